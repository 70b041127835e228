use tracing::warn;

use crate::data::VariationMethod;
use crate::render::Color;
use crate::style::{FillPalette, TooltipStyle, ZoomControlsVisibility};

use super::GlobeConfig;
use super::engine_config::{
    default_country_color, default_hover_color, default_initial_zoom, default_intro_duration_ms,
    default_intro_start_rotation, default_intro_start_scale, default_max_zoom,
    default_measure_end_color, default_measure_start_color, default_min_zoom,
    default_ocean_color, default_pinch_sensitivity, default_rotation_speed,
    default_selected_color, default_tooltip_background, default_tooltip_border_color,
    default_tooltip_border_radius, default_tooltip_border_width, default_tooltip_font_color,
    default_tooltip_font_size, default_tooltip_opacity, default_tooltip_padding,
    default_zoom_step,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedZoom {
    pub enabled: bool,
    pub touchpad_enabled: bool,
    pub min_factor: f64,
    pub max_factor: f64,
    pub initial_factor: f64,
    pub step: f64,
    pub pinch_sensitivity: f64,
    pub controls_visibility: ZoomControlsVisibility,
}

impl ResolvedZoom {
    /// Wheel and pinch input are accepted.
    #[must_use]
    pub fn continuous_enabled(&self) -> bool {
        self.enabled && self.touchpad_enabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAnimation {
    pub enabled: bool,
    pub duration_ms: f64,
    pub start_rotation: [f64; 3],
    pub start_scale_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedColoring {
    pub color_by_measure: bool,
    pub force_variation: bool,
    pub variation_method: VariationMethod,
    pub measure_start: Color,
    pub measure_end: Color,
}

/// Configuration after the single normalization pass at the entry
/// boundary. Downstream code never re-checks these values.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub rotation_speed: f64,
    pub zoom: ResolvedZoom,
    pub palette: FillPalette,
    pub ocean: Color,
    pub coloring: ResolvedColoring,
    pub animation: ResolvedAnimation,
    pub tooltip: TooltipStyle,
    /// One human-readable entry per corrected field.
    pub corrections: Vec<String>,
}

impl ResolvedConfig {
    /// Normalizes `config`, logging one warning per corrected field.
    #[must_use]
    pub fn resolve(config: &GlobeConfig) -> Self {
        let mut fixer = Fixer::default();

        let rotation_speed = if config.rotation_speed.is_nan() {
            fixer.note("rotation_speed", "is NaN, using default");
            default_rotation_speed()
        } else if config.rotation_speed < 0.0 || config.rotation_speed.is_infinite() {
            fixer.note("rotation_speed", "must be finite and >= 0, disabling idle rotation");
            0.0
        } else {
            config.rotation_speed
        };

        let zoom = &config.zoom;
        let mut min_factor = fixer.positive("zoom.min_factor", zoom.min_factor, default_min_zoom());
        let mut max_factor = fixer.positive("zoom.max_factor", zoom.max_factor, default_max_zoom());
        if min_factor >= max_factor {
            fixer.note(
                "zoom",
                "min_factor must be below max_factor, resetting both to defaults",
            );
            min_factor = default_min_zoom();
            max_factor = default_max_zoom();
        }
        let mut initial_factor = fixer.positive(
            "zoom.initial_factor",
            zoom.initial_factor,
            default_initial_zoom(),
        );
        if !(min_factor..=max_factor).contains(&initial_factor) {
            fixer.note("zoom.initial_factor", "outside zoom bounds, clamping");
            initial_factor = initial_factor.clamp(min_factor, max_factor);
        }
        let step = if zoom.step.is_finite() && zoom.step > 1.0 {
            zoom.step
        } else {
            fixer.note("zoom.step", "must be finite and > 1, using default");
            default_zoom_step()
        };
        let pinch_sensitivity = fixer.positive(
            "zoom.pinch_sensitivity",
            zoom.pinch_sensitivity,
            default_pinch_sensitivity(),
        );

        let colors = &config.colors;
        let palette = FillPalette {
            country: fixer.color("colors.country", &colors.country, default_country_color()),
            selected: fixer.color("colors.selected", &colors.selected, default_selected_color()),
            hover: fixer.color("colors.hover", &colors.hover, default_hover_color()),
        };
        let ocean = fixer.color("colors.ocean", &colors.ocean, default_ocean_color());
        let coloring = ResolvedColoring {
            color_by_measure: config.measure_coloring.color_by_measure,
            force_variation: config.measure_coloring.force_variation,
            variation_method: config.measure_coloring.variation_method,
            measure_start: fixer.color(
                "colors.measure_start",
                &colors.measure_start,
                default_measure_start_color(),
            ),
            measure_end: fixer.color(
                "colors.measure_end",
                &colors.measure_end,
                default_measure_end_color(),
            ),
        };

        let animation = &config.animation;
        let duration_ms = fixer.non_negative(
            "animation.duration_ms",
            animation.duration_ms,
            default_intro_duration_ms(),
        );
        let start_rotation = if animation.start_rotation.iter().all(|value| value.is_finite()) {
            animation.start_rotation
        } else {
            fixer.note("animation.start_rotation", "must be finite, using default");
            default_intro_start_rotation()
        };
        let start_scale_factor = fixer.positive(
            "animation.start_scale_factor",
            animation.start_scale_factor,
            default_intro_start_scale(),
        );

        let tooltip = &config.tooltip;
        let opacity = if tooltip.background_opacity.is_nan() {
            fixer.note("tooltip.background_opacity", "is NaN, using default");
            default_tooltip_opacity()
        } else {
            tooltip.background_opacity.clamp(0.0, 1.0)
        };
        let tooltip_style = TooltipStyle {
            background: fixer
                .color(
                    "tooltip.background_color",
                    &tooltip.background_color,
                    default_tooltip_background(),
                )
                .with_alpha(opacity),
            border_color: fixer.color(
                "tooltip.border_color",
                &tooltip.border_color,
                default_tooltip_border_color(),
            ),
            border_width: fixer.non_negative(
                "tooltip.border_width",
                tooltip.border_width,
                default_tooltip_border_width(),
            ),
            corner_radius: fixer.non_negative(
                "tooltip.border_radius",
                tooltip.border_radius,
                default_tooltip_border_radius(),
            ),
            padding: fixer.non_negative(
                "tooltip.padding",
                tooltip.padding,
                default_tooltip_padding(),
            ),
            font_size: fixer.positive(
                "tooltip.font_size",
                tooltip.font_size,
                default_tooltip_font_size(),
            ),
            font_weight: tooltip.font_weight,
            font_color: fixer.color(
                "tooltip.font_color",
                &tooltip.font_color,
                default_tooltip_font_color(),
            ),
        };

        Self {
            rotation_speed,
            zoom: ResolvedZoom {
                enabled: zoom.enabled,
                touchpad_enabled: zoom.touchpad_enabled,
                min_factor,
                max_factor,
                initial_factor,
                step,
                pinch_sensitivity,
                controls_visibility: zoom.controls_visibility,
            },
            palette,
            ocean,
            coloring,
            animation: ResolvedAnimation {
                enabled: animation.enabled,
                duration_ms,
                start_rotation,
                start_scale_factor,
            },
            tooltip: tooltip_style,
            corrections: fixer.corrections,
        }
    }
}

#[derive(Default)]
struct Fixer {
    corrections: Vec<String>,
}

impl Fixer {
    fn note(&mut self, field: &str, problem: &str) {
        warn!(field, problem, "normalized globe config");
        self.corrections.push(format!("{field}: {problem}"));
    }

    fn positive(&mut self, field: &str, value: f64, fallback: f64) -> f64 {
        if value.is_finite() && value > 0.0 {
            value
        } else {
            self.note(field, "must be finite and > 0, using default");
            fallback
        }
    }

    fn non_negative(&mut self, field: &str, value: f64, fallback: f64) -> f64 {
        if value.is_finite() && value >= 0.0 {
            value
        } else {
            self.note(field, "must be finite and >= 0, using default");
            fallback
        }
    }

    fn color(&mut self, field: &str, hex: &str, fallback: String) -> Color {
        match Color::from_hex(hex) {
            Ok(color) => color,
            Err(err) => {
                self.note(field, &format!("{err}, using default"));
                Color::from_hex(&fallback).unwrap_or(Color::rgb(0.0, 0.0, 0.0))
            }
        }
    }
}
