use crate::core::Viewport;
use crate::render::{Color, FontWeight, RectPrimitive, TextHAlign, TextPrimitive};

/// Distance between the pointer and the tooltip corner.
pub const TOOLTIP_OFFSET_PX: f64 = 15.0;
pub const TOOLTIP_MAX_WIDTH_PX: f64 = 200.0;

/// Label used when the query carries no measure title.
pub const FALLBACK_MEASURE_LABEL: &str = "Value";
pub const SELECTED_LABEL: &str = "Selected";

const LINE_HEIGHT_FACTOR: f64 = 1.4;
const NORMAL_GLYPH_WIDTH_FACTOR: f64 = 0.6;
const BOLD_GLYPH_WIDTH_FACTOR: f64 = 0.66;

/// Resolved tooltip appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipStyle {
    /// Background with the configured opacity already applied as alpha.
    pub background: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub corner_radius: f64,
    pub padding: f64,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub font_color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipLine {
    pub text: String,
    pub emphasized: bool,
}

/// Lines shown for one hovered country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub lines: Vec<TooltipLine>,
}

impl TooltipContent {
    /// Name first, then `"<label>: <value>"` when a value is given, then
    /// `"Selected"` for selected countries.
    #[must_use]
    pub fn for_country(
        display_name: &str,
        measure: Option<(&str, f64)>,
        selected: bool,
    ) -> Self {
        let mut lines = vec![TooltipLine {
            text: display_name.to_owned(),
            emphasized: true,
        }];
        if let Some((label, value)) = measure {
            lines.push(TooltipLine {
                text: format!("{label}: {}", format_measure_value(value)),
                emphasized: false,
            });
        }
        if selected {
            lines.push(TooltipLine {
                text: SELECTED_LABEL.to_owned(),
                emphasized: false,
            });
        }
        Self { lines }
    }

    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }
}

/// Formats with thousands separators and at most two fraction digits,
/// trailing zeros dropped.
#[must_use]
pub fn format_measure_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (integer != "0" || !fraction.is_empty());
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Tooltip box and text lines in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLayout {
    pub rect: RectPrimitive,
    pub texts: Vec<TextPrimitive>,
}

/// Places the tooltip 15 px right of and below the pointer, flipping to the
/// left or above when the box would leave the viewport.
#[must_use]
pub fn layout_tooltip(
    content: &TooltipContent,
    style: &TooltipStyle,
    pointer: (f64, f64),
    viewport: Viewport,
) -> TooltipLayout {
    let line_height = style.font_size * LINE_HEIGHT_FACTOR;
    let inner_max = (TOOLTIP_MAX_WIDTH_PX - 2.0 * style.padding).max(style.font_size);

    let lines: Vec<(String, FontWeight)> = content
        .lines
        .iter()
        .map(|line| {
            let weight = if line.emphasized {
                FontWeight::Bold
            } else {
                style.font_weight
            };
            (fit_line(&line.text, style.font_size, weight, inner_max), weight)
        })
        .collect();

    let text_width = lines
        .iter()
        .map(|(text, weight)| estimate_text_width(text, style.font_size, *weight))
        .fold(0.0_f64, f64::max);
    let width = text_width + 2.0 * style.padding;
    let height = lines.len() as f64 * line_height + 2.0 * style.padding;

    let (pointer_x, pointer_y) = pointer;
    let mut x = pointer_x + TOOLTIP_OFFSET_PX;
    let mut y = pointer_y + TOOLTIP_OFFSET_PX;
    if x + width > f64::from(viewport.width) {
        x = pointer_x - width - TOOLTIP_OFFSET_PX;
    }
    if y + height > f64::from(viewport.height) {
        y = pointer_y - height - TOOLTIP_OFFSET_PX;
    }

    let texts = lines
        .into_iter()
        .enumerate()
        .map(|(index, (text, font_weight))| TextPrimitive {
            text,
            x: x + style.padding,
            y: y + style.padding + index as f64 * line_height,
            font_size_px: style.font_size,
            font_weight,
            color: style.font_color,
            h_align: TextHAlign::Left,
        })
        .collect();

    TooltipLayout {
        rect: RectPrimitive {
            x,
            y,
            width,
            height,
            fill_color: style.background,
            border_color: style.border_color,
            border_width: style.border_width,
            corner_radius: style.corner_radius,
        },
        texts,
    }
}

fn estimate_text_width(text: &str, font_size: f64, weight: FontWeight) -> f64 {
    let factor = match weight {
        FontWeight::Normal => NORMAL_GLYPH_WIDTH_FACTOR,
        FontWeight::Bold => BOLD_GLYPH_WIDTH_FACTOR,
    };
    text.chars().count() as f64 * font_size * factor
}

/// Truncates with an ellipsis so the line fits `max_width`.
fn fit_line(text: &str, font_size: f64, weight: FontWeight, max_width: f64) -> String {
    if estimate_text_width(text, font_size, weight) <= max_width {
        return text.to_owned();
    }
    let per_char = estimate_text_width("m", font_size, weight);
    let keep = ((max_width / per_char).floor() as usize).saturating_sub(1).max(1);
    let mut fitted: String = text.chars().take(keep).collect();
    fitted.push('…');
    fitted
}

#[cfg(test)]
mod tests {
    use super::{TooltipContent, TooltipStyle, format_measure_value, layout_tooltip};
    use crate::core::Viewport;
    use crate::render::{Color, FontWeight};

    fn style() -> TooltipStyle {
        TooltipStyle {
            background: Color::rgba(0.97, 0.97, 0.98, 0.9),
            border_color: Color::rgb(1.0, 1.0, 1.0),
            border_width: 1.0,
            corner_radius: 4.0,
            padding: 8.0,
            font_size: 12.0,
            font_weight: FontWeight::Normal,
            font_color: Color::rgb(0.0, 0.4, 0.5),
        }
    }

    #[test]
    fn formats_like_a_grouped_locale_number() {
        assert_eq!(format_measure_value(1234567.891), "1,234,567.89");
        assert_eq!(format_measure_value(1000.0), "1,000");
        assert_eq!(format_measure_value(0.5), "0.5");
        assert_eq!(format_measure_value(-1234.5), "-1,234.5");
        assert_eq!(format_measure_value(-0.001), "0");
        assert_eq!(format_measure_value(999.999), "1,000");
    }

    #[test]
    fn content_lines_follow_country_state() {
        let content = TooltipContent::for_country("Peru", Some(("Sales", 1500.0)), true);
        assert_eq!(content.texts(), vec!["Peru", "Sales: 1,500", "Selected"]);
        let plain = TooltipContent::for_country("Peru", None, false);
        assert_eq!(plain.texts(), vec!["Peru"]);
    }

    #[test]
    fn flips_when_overflowing_bottom_right() {
        let content = TooltipContent::for_country("Peru", None, false);
        let viewport = Viewport::new(300, 200);

        let placed = layout_tooltip(&content, &style(), (10.0, 10.0), viewport);
        assert_eq!(placed.rect.x, 25.0);
        assert_eq!(placed.rect.y, 25.0);

        let flipped = layout_tooltip(&content, &style(), (295.0, 195.0), viewport);
        assert!(flipped.rect.x + flipped.rect.width <= 295.0 - 15.0 + 1e-9);
        assert!(flipped.rect.y + flipped.rect.height <= 195.0 - 15.0 + 1e-9);
    }
}
