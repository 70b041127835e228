use serde::{Deserialize, Serialize};

use crate::data::VariationMethod;
use crate::error::{GlobeError, GlobeResult};
use crate::render::FontWeight;
use crate::style::ZoomControlsVisibility;

/// Public globe configuration as delivered by the host property panel.
///
/// Every field has a default, so partial or stale host objects deserialize
/// cleanly. Values are checked once by [`super::ResolvedConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeConfig {
    /// Idle rotation speed in degrees per second; `0` disables it.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f64,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub measure_coloring: MeasureColoringConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub tooltip: TooltipConfig,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            rotation_speed: default_rotation_speed(),
            zoom: ZoomConfig::default(),
            colors: ColorConfig::default(),
            measure_coloring: MeasureColoringConfig::default(),
            animation: AnimationConfig::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl GlobeConfig {
    #[must_use]
    pub fn with_rotation_speed(mut self, degrees_per_second: f64) -> Self {
        self.rotation_speed = degrees_per_second;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorConfig) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_measure_coloring(mut self, measure_coloring: MeasureColoringConfig) -> Self {
        self.measure_coloring = measure_coloring;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Shorthand for turning the intro fly-in off.
    #[must_use]
    pub fn without_intro(mut self) -> Self {
        self.animation.enabled = false;
        self
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> GlobeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GlobeError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> GlobeResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GlobeError::InvalidData(format!("failed to parse config: {e}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Wheel/touchpad and pinch zoom; buttons stay active when off.
    #[serde(default = "default_true")]
    pub touchpad_enabled: bool,
    /// Bounds and initial zoom as factors of the globe radius.
    #[serde(default = "default_min_zoom")]
    pub min_factor: f64,
    #[serde(default = "default_max_zoom")]
    pub max_factor: f64,
    #[serde(default = "default_initial_zoom")]
    pub initial_factor: f64,
    /// Multiplier applied per zoom button click.
    #[serde(default = "default_zoom_step")]
    pub step: f64,
    #[serde(default = "default_pinch_sensitivity")]
    pub pinch_sensitivity: f64,
    #[serde(default)]
    pub controls_visibility: ZoomControlsVisibility,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            touchpad_enabled: true,
            min_factor: default_min_zoom(),
            max_factor: default_max_zoom(),
            initial_factor: default_initial_zoom(),
            step: default_zoom_step(),
            pinch_sensitivity: default_pinch_sensitivity(),
            controls_visibility: ZoomControlsVisibility::default(),
        }
    }
}

impl ZoomConfig {
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_touchpad_enabled(mut self, enabled: bool) -> Self {
        self.touchpad_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min_factor: f64, max_factor: f64) -> Self {
        self.min_factor = min_factor;
        self.max_factor = max_factor;
        self
    }

    #[must_use]
    pub fn with_initial_factor(mut self, initial_factor: f64) -> Self {
        self.initial_factor = initial_factor;
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    #[must_use]
    pub fn with_pinch_sensitivity(mut self, sensitivity: f64) -> Self {
        self.pinch_sensitivity = sensitivity;
        self
    }

    #[must_use]
    pub fn with_controls_visibility(mut self, visibility: ZoomControlsVisibility) -> Self {
        self.controls_visibility = visibility;
        self
    }
}

/// Colors as CSS hex strings (`#rgb` or `#rrggbb`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "default_country_color")]
    pub country: String,
    #[serde(default = "default_selected_color")]
    pub selected: String,
    #[serde(default = "default_hover_color")]
    pub hover: String,
    #[serde(default = "default_ocean_color")]
    pub ocean: String,
    #[serde(default = "default_measure_start_color")]
    pub measure_start: String,
    #[serde(default = "default_measure_end_color")]
    pub measure_end: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            country: default_country_color(),
            selected: default_selected_color(),
            hover: default_hover_color(),
            ocean: default_ocean_color(),
            measure_start: default_measure_start_color(),
            measure_end: default_measure_end_color(),
        }
    }
}

impl ColorConfig {
    #[must_use]
    pub fn with_selected(mut self, hex: impl Into<String>) -> Self {
        self.selected = hex.into();
        self
    }

    #[must_use]
    pub fn with_country(mut self, hex: impl Into<String>) -> Self {
        self.country = hex.into();
        self
    }

    #[must_use]
    pub fn with_measure_range(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.measure_start = start.into();
        self.measure_end = end.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MeasureColoringConfig {
    #[serde(default)]
    pub color_by_measure: bool,
    /// Synthesize variation even when the values already differ.
    #[serde(default)]
    pub force_variation: bool,
    #[serde(default)]
    pub variation_method: VariationMethod,
}

impl MeasureColoringConfig {
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            color_by_measure: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_force_variation(mut self, force: bool) -> Self {
        self.force_variation = force;
        self
    }

    #[must_use]
    pub fn with_variation_method(mut self, method: VariationMethod) -> Self {
        self.variation_method = method;
        self
    }
}

/// Intro fly-in settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_intro_duration_ms")]
    pub duration_ms: f64,
    #[serde(default = "default_intro_start_rotation")]
    pub start_rotation: [f64; 3],
    /// Start scale as a factor of the resting scale.
    #[serde(default = "default_intro_start_scale")]
    pub start_scale_factor: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: default_intro_duration_ms(),
            start_rotation: default_intro_start_rotation(),
            start_scale_factor: default_intro_start_scale(),
        }
    }
}

impl AnimationConfig {
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_start_pose(mut self, rotation: [f64; 3], scale_factor: f64) -> Self {
        self.start_rotation = rotation;
        self.start_scale_factor = scale_factor;
        self
    }
}

/// Tooltip appearance; lengths are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    #[serde(default = "default_tooltip_background")]
    pub background_color: String,
    #[serde(default = "default_tooltip_opacity")]
    pub background_opacity: f64,
    #[serde(default = "default_tooltip_border_color")]
    pub border_color: String,
    #[serde(default = "default_tooltip_border_width")]
    pub border_width: f64,
    #[serde(default = "default_tooltip_border_radius")]
    pub border_radius: f64,
    #[serde(default = "default_tooltip_padding")]
    pub padding: f64,
    #[serde(default = "default_tooltip_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default = "default_tooltip_font_color")]
    pub font_color: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            background_color: default_tooltip_background(),
            background_opacity: default_tooltip_opacity(),
            border_color: default_tooltip_border_color(),
            border_width: default_tooltip_border_width(),
            border_radius: default_tooltip_border_radius(),
            padding: default_tooltip_padding(),
            font_size: default_tooltip_font_size(),
            font_weight: FontWeight::Normal,
            font_color: default_tooltip_font_color(),
        }
    }
}

pub(super) fn default_rotation_speed() -> f64 {
    20.0
}

fn default_true() -> bool {
    true
}

pub(super) fn default_min_zoom() -> f64 {
    0.5
}

pub(super) fn default_max_zoom() -> f64 {
    2.5
}

pub(super) fn default_initial_zoom() -> f64 {
    1.25
}

pub(super) fn default_zoom_step() -> f64 {
    1.2
}

pub(super) fn default_pinch_sensitivity() -> f64 {
    1.0
}

pub(super) fn default_country_color() -> String {
    "#d4dadc".to_owned()
}

pub(super) fn default_selected_color() -> String {
    "#006580".to_owned()
}

pub(super) fn default_hover_color() -> String {
    "#b8bfc2".to_owned()
}

pub(super) fn default_ocean_color() -> String {
    "#ffffff".to_owned()
}

pub(super) fn default_measure_start_color() -> String {
    "#e5f3ec".to_owned()
}

pub(super) fn default_measure_end_color() -> String {
    "#008536".to_owned()
}

pub(super) fn default_intro_duration_ms() -> f64 {
    2000.0
}

pub(super) fn default_intro_start_rotation() -> [f64; 3] {
    [-120.0, -20.0, 0.0]
}

pub(super) fn default_intro_start_scale() -> f64 {
    0.6
}

pub(super) fn default_tooltip_background() -> String {
    "#F8F9FA".to_owned()
}

pub(super) fn default_tooltip_opacity() -> f64 {
    0.9
}

pub(super) fn default_tooltip_border_color() -> String {
    "#ffffff".to_owned()
}

pub(super) fn default_tooltip_border_width() -> f64 {
    1.0
}

pub(super) fn default_tooltip_border_radius() -> f64 {
    4.0
}

pub(super) fn default_tooltip_padding() -> f64 {
    8.0
}

pub(super) fn default_tooltip_font_size() -> f64 {
    12.0
}

pub(super) fn default_tooltip_font_color() -> String {
    "#006580".to_owned()
}

