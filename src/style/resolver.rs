use serde::{Deserialize, Serialize};

use crate::data::{MeasureMap, SelectionSet};
use crate::render::Color;
use crate::style::ColorScale;

pub const DEFAULT_STROKE_WIDTH: f64 = 0.5;
pub const SELECTED_STROKE_WIDTH: f64 = 1.0;

/// `#999999`
pub const DEFAULT_STROKE_COLOR: Color = Color::rgb(0.6, 0.6, 0.6);
pub const SELECTED_STROKE_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);

/// Fixed fill colors resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillPalette {
    pub country: Color,
    pub selected: Color,
    pub hover: Color,
}

/// Which precedence rule produced a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillSource {
    Selected,
    Measure,
    Default,
}

/// Derived coloring inputs for one refresh.
#[derive(Debug, Clone, Copy)]
pub struct ColoringState<'a> {
    pub selection: &'a SelectionSet,
    pub measure: Option<&'a MeasureMap>,
    pub scale: Option<&'a ColorScale>,
    pub color_by_measure: bool,
}

impl ColoringState<'_> {
    /// Precedence: selected, then measure value through the scale, then
    /// default.
    #[must_use]
    pub fn fill_source(&self, key: &str) -> FillSource {
        if self.selection.contains(key) {
            return FillSource::Selected;
        }
        if self.measure_color(key).is_some() {
            return FillSource::Measure;
        }
        FillSource::Default
    }

    #[must_use]
    pub fn resolve_fill(&self, key: &str, palette: &FillPalette) -> Color {
        if self.selection.contains(key) {
            return palette.selected;
        }
        self.measure_color(key).unwrap_or(palette.country)
    }

    /// Hover wins over every other rule while the pointer is on the country.
    #[must_use]
    pub fn resolve_hover_fill(&self, key: &str, palette: &FillPalette, hovered: bool) -> Color {
        if hovered {
            palette.hover
        } else {
            self.resolve_fill(key, palette)
        }
    }

    #[must_use]
    pub fn stroke_width(&self, key: &str) -> f64 {
        if self.selection.contains(key) {
            SELECTED_STROKE_WIDTH
        } else {
            DEFAULT_STROKE_WIDTH
        }
    }

    #[must_use]
    pub fn stroke_color(&self, key: &str) -> Color {
        if self.selection.contains(key) {
            SELECTED_STROKE_COLOR
        } else {
            DEFAULT_STROKE_COLOR
        }
    }

    fn measure_color(&self, key: &str) -> Option<Color> {
        if !self.color_by_measure {
            return None;
        }
        let value = self.measure?.get(key)?;
        self.scale.map(|scale| scale.color_for(*value))
    }
}
