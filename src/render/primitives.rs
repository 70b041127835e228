use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{GlobeError, GlobeResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb` or shorthand `#rgb` (leading `#` optional).
    pub fn from_hex(input: &str) -> GlobeResult<Self> {
        let hex = input.trim().trim_start_matches('#');
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_owned(),
            _ => {
                return Err(GlobeError::InvalidData(format!(
                    "color `{input}` must be #rgb or #rrggbb"
                )));
            }
        };

        let channel = |range: std::ops::Range<usize>| -> GlobeResult<f64> {
            expanded
                .get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .map(|value| f64::from(value) / 255.0)
                .ok_or_else(|| GlobeError::InvalidData(format!("color `{input}` is not hex")))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Lowercase `#rrggbb`; alpha is dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    #[must_use]
    pub fn rgb8(self) -> [u8; 3] {
        let quantize = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
        ]
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Channel-wise linear interpolation, `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
            alpha: mix(self.alpha, other.alpha),
        }
    }

    pub fn validate(self) -> GlobeResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GlobeError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn validate_point(x: f64, y: f64, what: &str) -> GlobeResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(GlobeError::InvalidData(format!(
            "{what} coordinates must be finite"
        )));
    }
    Ok(())
}

/// Filled and stroked country outline in pixel space.
///
/// Projected screen-space rings of one country, shared between the cached
/// scene and every frame drawn from it.
pub type ProjectedRings = Rc<[Vec<(f64, f64)>]>;

/// Each entry of `rings` is one closed sub-path; holes are drawn with the
/// even-odd rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub key: String,
    pub rings: ProjectedRings,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl PathPrimitive {
    pub fn validate(&self) -> GlobeResult<()> {
        for ring in self.rings.iter() {
            for &(x, y) in ring {
                validate_point(x, y, "path")?;
            }
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(GlobeError::InvalidData(
                "path stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        self.stroke.validate()
    }
}

/// Circle used for the ocean disc and the globe outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Option<Color>,
    pub stroke: Option<(Color, f64)>,
}

impl CirclePrimitive {
    pub fn validate(self) -> GlobeResult<()> {
        validate_point(self.cx, self.cy, "circle")?;
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(GlobeError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some((color, width)) = self.stroke {
            if !width.is_finite() || width <= 0.0 {
                return Err(GlobeError::InvalidData(
                    "circle stroke width must be finite and > 0".to_owned(),
                ));
            }
            color.validate()?;
        }
        Ok(())
    }
}

/// Rounded box, used for the tooltip background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub corner_radius: f64,
}

impl RectPrimitive {
    pub fn validate(self) -> GlobeResult<()> {
        validate_point(self.x, self.y, "rect")?;
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("border_width", self.border_width),
            ("corner_radius", self.corner_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GlobeError::InvalidData(format!(
                    "rect `{name}` must be finite and >= 0"
                )));
            }
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
}

/// One line of text; `y` is the top of the line box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub font_weight: FontWeight,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    pub fn validate(&self) -> GlobeResult<()> {
        if self.text.is_empty() {
            return Err(GlobeError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        validate_point(self.x, self.y, "text")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(GlobeError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_long_and_short_hex() {
        let long = Color::from_hex("#006580").expect("long hex");
        assert_eq!(long.rgb8(), [0x00, 0x65, 0x80]);
        let short = Color::from_hex("fff").expect("short hex");
        assert_eq!(short.to_hex(), "#ffffff");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let start = Color::from_hex("#000000").expect("start");
        let end = Color::from_hex("#ffffff").expect("end");
        assert_eq!(start.lerp(end, 0.0).to_hex(), "#000000");
        assert_eq!(start.lerp(end, 1.0).to_hex(), "#ffffff");
        assert_eq!(start.lerp(end, 0.5).to_hex(), "#808080");
        assert_eq!(start.lerp(end, 7.0).to_hex(), "#ffffff");
    }
}
