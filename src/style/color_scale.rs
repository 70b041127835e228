use crate::data::{MeasureMap, distinct_value_count, value_extent};
use crate::render::Color;

/// Maps a measure value to a fill color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorScale {
    /// Linear interpolation from `start` at `min` to `end` at `max`.
    Linear {
        start: Color,
        end: Color,
        min: f64,
        max: f64,
    },
    /// Degenerate domain: every value maps to the end color.
    Constant(Color),
}

impl ColorScale {
    /// Builds a scale over the value extent of `values`. Returns `None` for
    /// an empty map.
    #[must_use]
    pub fn from_values(values: &MeasureMap, start: Color, end: Color) -> Option<Self> {
        let (min, max) = value_extent(values)?;
        if min == max || distinct_value_count(values) <= 1 {
            return Some(Self::Constant(end));
        }
        Some(Self::Linear {
            start,
            end,
            min,
            max,
        })
    }

    /// Values outside the domain clamp to the nearest endpoint.
    #[must_use]
    pub fn color_for(&self, value: f64) -> Color {
        match *self {
            Self::Constant(color) => color,
            Self::Linear {
                start,
                end,
                min,
                max,
            } => start.lerp(end, (value - min) / (max - min)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ColorScale;
    use crate::data::MeasureMap;
    use crate::render::Color;

    fn values(pairs: &[(&str, f64)]) -> MeasureMap {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), *value))
            .collect()
    }

    #[test]
    fn interpolates_between_endpoints() {
        let start = Color::from_hex("#000000").expect("start");
        let end = Color::from_hex("#ffffff").expect("end");
        let scale = ColorScale::from_values(&values(&[("A", 0.0), ("B", 10.0)]), start, end)
            .expect("scale");
        assert_eq!(scale.color_for(0.0).to_hex(), "#000000");
        assert_eq!(scale.color_for(10.0).to_hex(), "#ffffff");
        assert_eq!(scale.color_for(5.0).to_hex(), "#808080");
        assert_eq!(scale.color_for(99.0).to_hex(), "#ffffff");
    }

    #[test]
    fn identical_values_give_constant_end_color() {
        let start = Color::from_hex("#e5f3ec").expect("start");
        let end = Color::from_hex("#008536").expect("end");
        let scale = ColorScale::from_values(&values(&[("A", 4.0), ("B", 4.0)]), start, end)
            .expect("scale");
        assert_eq!(scale, ColorScale::Constant(end));
        assert!(ColorScale::from_values(&MeasureMap::new(), start, end).is_none());
    }
}
