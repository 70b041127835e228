use serde::{Deserialize, Serialize};

/// Pixels-to-degrees factor for drag rotation, divided by the current scale.
pub const DRAG_SENSITIVITY: f64 = 75.0;

/// Rotation after a drag step. Tilt clamping is left to `ProjectionState`.
#[must_use]
pub fn drag_rotation(rotation: [f64; 3], dx: f64, dy: f64, scale: f64) -> [f64; 3] {
    if !(scale.is_finite() && scale > 0.0) {
        return rotation;
    }
    let k = DRAG_SENSITIVITY / scale;
    [rotation[0] + dx * k, rotation[1] - dy * k, rotation[2]]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Two-finger pinch anchored at the distance and scale seen at gesture
/// start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchTracker {
    start_distance: f64,
    start_scale: f64,
}

impl PinchTracker {
    /// Returns `None` when the fingers coincide.
    #[must_use]
    pub fn begin(first: TouchPoint, second: TouchPoint, scale: f64) -> Option<Self> {
        let start_distance = first.distance_to(second);
        (start_distance.is_finite() && start_distance > 0.0).then_some(Self {
            start_distance,
            start_scale: scale,
        })
    }

    /// Unclamped scale for the current finger distance. The raw ratio is
    /// softened or amplified by `sensitivity` around 1.
    #[must_use]
    pub fn scale_for(&self, first: TouchPoint, second: TouchPoint, sensitivity: f64) -> f64 {
        let ratio = first.distance_to(second) / self.start_distance;
        let adjusted = 1.0 + (ratio - 1.0) * sensitivity;
        self.start_scale * adjusted
    }

    #[must_use]
    pub fn start_scale(&self) -> f64 {
        self.start_scale
    }
}

/// Unit of a wheel event's `delta_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Pixel => 0.002,
            Self::Line => 0.05,
            Self::Page => 1.0,
        }
    }
}

/// Multiplicative zoom step for one wheel event; scrolling up zooms in.
#[must_use]
pub fn wheel_factor(delta_y: f64, mode: WheelDeltaMode) -> f64 {
    if !delta_y.is_finite() {
        return 1.0;
    }
    (-delta_y * mode.multiplier()).exp2()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{PinchTracker, TouchPoint, WheelDeltaMode, drag_rotation, wheel_factor};

    #[test]
    fn drag_is_scale_invariant() {
        let near = drag_rotation([0.0, 0.0, 0.0], 10.0, 0.0, 75.0);
        let far = drag_rotation([0.0, 0.0, 0.0], 20.0, 0.0, 150.0);
        assert_abs_diff_eq!(near[0], 10.0);
        assert_abs_diff_eq!(near[0], far[0]);
        let down = drag_rotation([0.0, 0.0, 0.0], 0.0, 10.0, 75.0);
        assert_abs_diff_eq!(down[1], -10.0);
    }

    #[test]
    fn pinch_follows_distance_ratio_with_sensitivity() {
        let a = TouchPoint::new(1, 0.0, 0.0);
        let tracker = PinchTracker::begin(a, TouchPoint::new(2, 100.0, 0.0), 80.0)
            .expect("pinch");
        let spread = TouchPoint::new(2, 150.0, 0.0);
        assert_abs_diff_eq!(tracker.scale_for(a, spread, 1.0), 120.0);
        assert_abs_diff_eq!(tracker.scale_for(a, spread, 0.5), 100.0);
        assert!(PinchTracker::begin(a, a, 80.0).is_none());
    }

    #[test]
    fn wheel_modes_scale_delta() {
        assert_abs_diff_eq!(wheel_factor(-500.0, WheelDeltaMode::Pixel), 2.0);
        assert_abs_diff_eq!(wheel_factor(20.0, WheelDeltaMode::Line), 0.5);
        assert_abs_diff_eq!(wheel_factor(1.0, WheelDeltaMode::Page), 0.5);
        assert_abs_diff_eq!(wheel_factor(f64::NAN, WheelDeltaMode::Page), 1.0);
    }
}
