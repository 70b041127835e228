pub mod gestures;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use gestures::{
    DRAG_SENSITIVITY, PinchTracker, TouchPoint, WheelDeltaMode, drag_rotation, wheel_factor,
};

/// Who currently holds control of the projection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GestureMode {
    #[default]
    Idle,
    Dragging,
    Pinching,
    WheelZooming,
    IntroAnimating,
}

impl GestureMode {
    /// True for the user-driven modes that suspend idle rotation.
    #[must_use]
    pub fn is_gesture(self) -> bool {
        matches!(self, Self::Dragging | Self::Pinching | Self::WheelZooming)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureEvent {
    DragStart,
    PinchStart,
    WheelInput,
    GestureEnd,
    IntroStart,
    IntroEnd,
}

/// Transition table. `None` means the event is ignored in that mode.
///
/// Any gesture preempts the intro; a drag or pinch preempts a wheel zoom;
/// a second finger turns a touch drag into a pinch. Wheel input during a
/// drag or pinch is ignored.
#[must_use]
pub fn transition(mode: GestureMode, event: GestureEvent) -> Option<GestureMode> {
    use GestureEvent as E;
    use GestureMode as M;

    match (mode, event) {
        (M::Idle, E::IntroStart) => Some(M::IntroAnimating),
        (M::IntroAnimating, E::IntroEnd) => Some(M::Idle),

        (M::Idle | M::IntroAnimating | M::WheelZooming, E::DragStart) => Some(M::Dragging),
        (M::Idle | M::IntroAnimating | M::WheelZooming | M::Dragging, E::PinchStart) => {
            Some(M::Pinching)
        }
        (M::Idle | M::IntroAnimating | M::WheelZooming, E::WheelInput) => Some(M::WheelZooming),

        (M::Dragging | M::Pinching | M::WheelZooming, E::GestureEnd) => Some(M::Idle),
        _ => None,
    }
}

/// Pointer, touch and hover bookkeeping for one globe instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    mode: GestureMode,
    last_drag_point: Option<(f64, f64)>,
    touches: SmallVec<[TouchPoint; 2]>,
    pinch: Option<PinchTracker>,
    zoom_factor: f64,
    pointer: Option<(f64, f64)>,
    hovered: Option<String>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: GestureMode::Idle,
            last_drag_point: None,
            touches: SmallVec::new(),
            pinch: None,
            zoom_factor: 1.0,
            pointer: None,
            hovered: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Applies `event`; returns `(previous, next)` when accepted.
    pub fn apply(&mut self, event: GestureEvent) -> Option<(GestureMode, GestureMode)> {
        let previous = self.mode;
        let next = transition(previous, event)?;
        self.mode = next;
        if !matches!(next, GestureMode::Dragging) {
            self.last_drag_point = None;
        }
        if !matches!(next, GestureMode::Pinching) {
            self.pinch = None;
        }
        Some((previous, next))
    }

    pub fn set_last_drag_point(&mut self, point: (f64, f64)) {
        self.last_drag_point = Some(point);
    }

    /// Returns the delta since the previous drag point and stores `point`.
    pub fn take_drag_delta(&mut self, point: (f64, f64)) -> Option<(f64, f64)> {
        let last = self.last_drag_point.replace(point)?;
        Some((point.0 - last.0, point.1 - last.1))
    }

    #[must_use]
    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    /// Inserts or updates touches by id.
    pub fn upsert_touches(&mut self, touches: &[TouchPoint]) {
        for touch in touches {
            match self.touches.iter_mut().find(|known| known.id == touch.id) {
                Some(known) => *known = *touch,
                None => self.touches.push(*touch),
            }
        }
    }

    /// Drops the listed touches and returns how many were tracked.
    pub fn remove_touches(&mut self, ids: &[u64]) -> usize {
        let before = self.touches.len();
        self.touches.retain(|touch| !ids.contains(&touch.id));
        before - self.touches.len()
    }

    /// First two active touches, when exactly two are down.
    #[must_use]
    pub fn touch_pair(&self) -> Option<(TouchPoint, TouchPoint)> {
        match self.touches.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    #[must_use]
    pub fn pinch(&self) -> Option<PinchTracker> {
        self.pinch
    }

    pub fn set_pinch(&mut self, pinch: Option<PinchTracker>) {
        self.pinch = pinch;
    }

    /// Cumulative zoom factor relative to the default scale.
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn set_zoom_factor(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom_factor = factor;
        }
    }

    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.hovered = None;
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Returns true when the hovered country changed.
    pub fn set_hovered(&mut self, key: Option<String>) -> bool {
        if self.hovered == key {
            return false;
        }
        self.hovered = key;
        true
    }

    /// Drops every transient input, keeping the zoom factor.
    pub fn clear_inputs(&mut self) {
        self.last_drag_point = None;
        self.touches.clear();
        self.pinch = None;
        self.pointer = None;
        self.hovered = None;
        if self.mode.is_gesture() {
            self.mode = GestureMode::Idle;
        }
    }
}
