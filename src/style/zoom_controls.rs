use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::render::{Color, FontWeight, RectPrimitive, TextHAlign, TextPrimitive};

const MARGIN_PX: f64 = 20.0;
const BUTTON_SIZE_PX: f64 = 40.0;
const GAP_PX: f64 = 5.0;
const INDICATOR_HEIGHT_PX: f64 = 20.0;
const BUTTON_FONT_PX: f64 = 20.0;
const INDICATOR_FONT_PX: f64 = 12.0;

/// When the zoom buttons and indicator are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoomControlsVisibility {
    #[default]
    Always,
    /// Only while the pointer is inside the viewport.
    Hover,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomControl {
    ZoomIn,
    Reset,
    ZoomOut,
}

impl ZoomControl {
    const ALL: [Self; 3] = [Self::ZoomIn, Self::Reset, Self::ZoomOut];

    fn label(self) -> &'static str {
        match self {
            Self::ZoomIn => "+",
            Self::Reset => "⌂",
            Self::ZoomOut => "−",
        }
    }
}

/// Button column anchored 20 px from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomControlsLayout {
    origin: (f64, f64),
}

impl ZoomControlsLayout {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let total_height = 3.0 * BUTTON_SIZE_PX + 3.0 * GAP_PX + INDICATOR_HEIGHT_PX;
        Self {
            origin: (MARGIN_PX, f64::from(viewport.height) - MARGIN_PX - total_height),
        }
    }

    #[must_use]
    pub fn button_rect(&self, control: ZoomControl) -> (f64, f64, f64, f64) {
        let index = match control {
            ZoomControl::ZoomIn => 0.0,
            ZoomControl::Reset => 1.0,
            ZoomControl::ZoomOut => 2.0,
        };
        (
            self.origin.0,
            self.origin.1 + index * (BUTTON_SIZE_PX + GAP_PX),
            BUTTON_SIZE_PX,
            BUTTON_SIZE_PX,
        )
    }

    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ZoomControl> {
        ZoomControl::ALL.into_iter().find(|control| {
            let (left, top, width, height) = self.button_rect(*control);
            x >= left && x <= left + width && y >= top && y <= top + height
        })
    }

    /// Buttons plus the `"<percent>%"` indicator below them.
    #[must_use]
    pub fn primitives(&self, zoom_percent: i64) -> (Vec<RectPrimitive>, Vec<TextPrimitive>) {
        let fill = Color::rgb(1.0, 1.0, 1.0);
        let border = Color::rgb(0.8, 0.8, 0.8);
        let text_color = Color::rgb(0.2, 0.2, 0.2);

        let mut rects = Vec::with_capacity(3);
        let mut texts = Vec::with_capacity(4);
        for control in ZoomControl::ALL {
            let (x, y, width, height) = self.button_rect(control);
            rects.push(RectPrimitive {
                x,
                y,
                width,
                height,
                fill_color: fill,
                border_color: border,
                border_width: 1.0,
                corner_radius: 4.0,
            });
            texts.push(TextPrimitive {
                text: control.label().to_owned(),
                x: x + width / 2.0,
                y: y + (height - BUTTON_FONT_PX) / 2.0,
                font_size_px: BUTTON_FONT_PX,
                font_weight: FontWeight::Normal,
                color: text_color,
                h_align: TextHAlign::Center,
            });
        }

        let indicator_top = self.origin.1 + 3.0 * (BUTTON_SIZE_PX + GAP_PX);
        texts.push(TextPrimitive {
            text: format!("{zoom_percent}%"),
            x: self.origin.0 + BUTTON_SIZE_PX / 2.0,
            y: indicator_top + (INDICATOR_HEIGHT_PX - INDICATOR_FONT_PX) / 2.0,
            font_size_px: INDICATOR_FONT_PX,
            font_weight: FontWeight::Normal,
            color: text_color,
            h_align: TextHAlign::Center,
        });
        (rects, texts)
    }
}

#[cfg(test)]
mod tests {
    use super::{ZoomControl, ZoomControlsLayout};
    use crate::core::Viewport;

    #[test]
    fn buttons_stack_from_bottom_left() {
        let layout = ZoomControlsLayout::new(Viewport::new(800, 600));
        let (x, y, _, _) = layout.button_rect(ZoomControl::ZoomIn);
        assert_eq!(x, 20.0);
        assert_eq!(y, 600.0 - 20.0 - 155.0);
        assert_eq!(layout.hit_test(40.0, y + 45.0 + 10.0), Some(ZoomControl::Reset));
        assert_eq!(layout.hit_test(400.0, 300.0), None);

        let (rects, texts) = layout.primitives(125);
        assert_eq!(rects.len(), 3);
        assert_eq!(texts.last().map(|text| text.text.as_str()), Some("125%"));
    }
}
