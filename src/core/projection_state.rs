use serde::{Deserialize, Serialize};

use crate::core::{OrthographicProjection, Viewport};

/// Globe radius is `min(width, height) / GLOBE_RADIUS_FACTOR`.
pub const GLOBE_RADIUS_FACTOR: f64 = 2.5;

/// Rotation restored by the reset button and used when nothing is cached.
pub const DEFAULT_ROTATION: [f64; 3] = [0.0, -25.0, 0.0];

pub const MIN_TILT: f64 = -90.0;
pub const MAX_TILT: f64 = 90.0;

/// Zoom bounds in pixels, derived from the viewport radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ScaleBounds {
    /// Derives bounds from a radius and zoom factors. Factors are expected to
    /// be normalized already (`min_factor < max_factor`); the default is
    /// clamped into the bounds.
    #[must_use]
    pub fn from_radius(radius: f64, min_factor: f64, max_factor: f64, initial_factor: f64) -> Self {
        let min = radius * min_factor;
        let max = radius * max_factor;
        Self {
            min,
            max,
            default: (radius * initial_factor).clamp(min, max),
        }
    }

    /// Clamps a requested scale into `[min, max]`; non-finite requests fall
    /// back to `default`.
    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.default;
        }
        scale.clamp(self.min, self.max)
    }
}

#[must_use]
pub fn globe_radius(viewport: Viewport) -> f64 {
    f64::from(viewport.width.min(viewport.height)) / GLOBE_RADIUS_FACTOR
}

/// Single source of truth for rotation and zoom of one globe instance.
///
/// Every setter enforces `min <= scale <= max` and `phi` within
/// `[-90, 90]`; `lambda` and `gamma` are left unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionState {
    rotation: [f64; 3],
    scale: f64,
    bounds: ScaleBounds,
}

impl ProjectionState {
    #[must_use]
    pub fn new(rotation: [f64; 3], scale: f64, bounds: ScaleBounds) -> Self {
        let mut state = Self {
            rotation: DEFAULT_ROTATION,
            scale: bounds.default,
            bounds,
        };
        state.set_rotation(rotation);
        state.set_scale(scale);
        state
    }

    /// Computes bounds for the viewport and starts from the cached pose when
    /// one exists, or from the defaults otherwise.
    #[must_use]
    pub fn setup(
        viewport: Viewport,
        min_factor: f64,
        max_factor: f64,
        initial_factor: f64,
        cached: Option<([f64; 3], f64)>,
    ) -> Self {
        let bounds = ScaleBounds::from_radius(
            globe_radius(viewport),
            min_factor,
            max_factor,
            initial_factor,
        );
        match cached {
            Some((rotation, scale)) => Self::new(rotation, scale, bounds),
            None => Self::new(DEFAULT_ROTATION, bounds.default, bounds),
        }
    }

    #[must_use]
    pub fn rotation(&self) -> [f64; 3] {
        self.rotation
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn bounds(&self) -> ScaleBounds {
        self.bounds
    }

    /// Current zoom relative to the default scale (`1.0` at rest).
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.scale / self.bounds.default
    }

    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        (self.zoom_factor() * 100.0).round() as i64
    }

    pub fn set_scale(&mut self, scale: f64) -> f64 {
        self.scale = self.bounds.clamp(scale);
        self.scale
    }

    pub fn set_rotation(&mut self, rotation: [f64; 3]) {
        let [lambda, phi, gamma] = rotation;
        let keep = |value: f64, fallback: f64| if value.is_finite() { value } else { fallback };
        self.rotation = [
            keep(lambda, self.rotation[0]),
            keep(phi, self.rotation[1]).clamp(MIN_TILT, MAX_TILT),
            keep(gamma, self.rotation[2]),
        ];
    }

    /// Advances the primary (longitude) axis.
    pub fn advance_lambda(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation[0] += degrees;
        }
    }

    /// Replaces bounds, rescaling the current scale by the ratio of the new
    /// radius to the old one. Rotation is left untouched.
    pub fn rebound(&mut self, bounds: ScaleBounds, radius_ratio: f64) {
        self.bounds = bounds;
        let ratio = if radius_ratio.is_finite() && radius_ratio > 0.0 {
            radius_ratio
        } else {
            1.0
        };
        self.set_scale(self.scale * ratio);
    }

    pub fn reset(&mut self) {
        self.rotation = DEFAULT_ROTATION;
        self.scale = self.bounds.default;
    }

    #[must_use]
    pub fn projection(&self, viewport: Viewport) -> OrthographicProjection {
        OrthographicProjection::new(viewport, self.rotation, self.scale)
    }
}
