use tracing::{debug, trace};

use crate::core::DEFAULT_ROTATION;
use crate::interaction::{
    GestureEvent, GestureMode, PinchTracker, TouchPoint, WheelDeltaMode, drag_rotation,
    transition, wheel_factor,
};
use crate::render::Renderer;
use crate::style::ZoomControlsLayout;

use super::GlobeEngine;

/// Quiet period after the last wheel event that ends a wheel zoom.
pub const WHEEL_END_DELAY_MS: f64 = 150.0;

impl<R: Renderer> GlobeEngine<R> {
    /// Starts a mouse drag. Ignored on the zoom buttons and before the first
    /// paint.
    pub fn drag_start(&mut self, x: f64, y: f64) -> bool {
        if !self.input_enabled() || self.on_zoom_control(x, y) {
            return false;
        }
        if !self.begin_gesture(GestureEvent::DragStart) {
            return false;
        }
        self.interaction.set_last_drag_point((x, y));
        true
    }

    pub fn drag_move(&mut self, x: f64, y: f64) {
        if self.interaction.mode() != GestureMode::Dragging {
            return;
        }
        self.apply_drag_to((x, y));
    }

    pub fn drag_end(&mut self) {
        if self.interaction.mode() == GestureMode::Dragging {
            self.end_gesture();
        }
    }

    /// Wheel or touchpad zoom. Returns true when the event was consumed and
    /// the host should suppress its default scrolling.
    pub fn wheel(&mut self, delta_y: f64, delta_mode: WheelDeltaMode) -> bool {
        if !self.input_enabled() || !self.resolved.zoom.continuous_enabled() {
            return false;
        }
        if self.interaction.mode() != GestureMode::WheelZooming
            && !self.begin_gesture(GestureEvent::WheelInput)
        {
            return false;
        }

        let bounds = self.projection.bounds();
        let k = (self.interaction.zoom_factor() * wheel_factor(delta_y, delta_mode))
            .clamp(bounds.min / bounds.default, bounds.max / bounds.default);
        self.commit_view(None, Some(bounds.default * k));
        trace!(instance_id = %self.instance_id, k, "wheel zoom");

        if let Some(previous) = self.timers.wheel_end.take() {
            self.host.scheduler.clear_timeout(previous);
        }
        self.timers.wheel_end = Some(self.host.scheduler.set_timeout(WHEEL_END_DELAY_MS));
        true
    }

    /// Touches that went down. Returns true when the host should suppress
    /// native handling (always the case once a pinch is engaged).
    pub fn touch_start(&mut self, touches: &[TouchPoint]) -> bool {
        if !self.input_enabled() {
            return false;
        }
        self.interaction.upsert_touches(touches);

        if let Some((first, second)) = self.interaction.touch_pair() {
            if !self.resolved.zoom.continuous_enabled() {
                return false;
            }
            let Some(pinch) = PinchTracker::begin(first, second, self.projection.scale()) else {
                return false;
            };
            if self.interaction.mode() != GestureMode::Pinching
                && !self.begin_gesture(GestureEvent::PinchStart)
            {
                return false;
            }
            self.interaction.set_pinch(Some(pinch));
            return true;
        }

        let single = match self.interaction.touches() {
            [only] => Some(*only),
            _ => None,
        };
        let Some(touch) = single else {
            return false;
        };
        if self.on_zoom_control(touch.x, touch.y) || !self.begin_gesture(GestureEvent::DragStart)
        {
            return false;
        }
        self.interaction.set_last_drag_point((touch.x, touch.y));
        true
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> bool {
        if !self.input_enabled() {
            return false;
        }
        self.interaction.upsert_touches(touches);
        match self.interaction.mode() {
            GestureMode::Pinching => {
                let (Some(pinch), Some((first, second))) =
                    (self.interaction.pinch(), self.interaction.touch_pair())
                else {
                    return true;
                };
                let scale =
                    pinch.scale_for(first, second, self.resolved.zoom.pinch_sensitivity);
                self.commit_view(None, Some(scale));
                true
            }
            GestureMode::Dragging => {
                let Some(first) = self.interaction.touches().first().copied() else {
                    return false;
                };
                self.apply_drag_to((first.x, first.y));
                true
            }
            _ => false,
        }
    }

    /// Touches that were lifted or canceled. A touch gesture ends once its
    /// last tracked touch is gone; ids nobody tracks leave a mouse drag alone.
    pub fn touch_end(&mut self, ids: &[u64]) {
        let removed = self.interaction.remove_touches(ids);
        let mode = self.interaction.mode();
        if removed > 0
            && matches!(mode, GestureMode::Pinching | GestureMode::Dragging)
            && self.interaction.touches().is_empty()
        {
            self.end_gesture();
        }
    }

    /// Multiplies the scale by the configured step. No-op when zoom is
    /// disabled.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(self.resolved.zoom.step)
    }

    /// Divides the scale by the configured step. No-op when zoom is
    /// disabled.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(1.0 / self.resolved.zoom.step)
    }

    /// Restores the default rotation and scale in one commit.
    pub fn reset_view(&mut self) -> bool {
        if !self.input_enabled() {
            return false;
        }
        self.preempt_intro();
        let default_scale = self.projection.bounds().default;
        self.commit_view(Some(DEFAULT_ROTATION), Some(default_scale));
        debug!(instance_id = %self.instance_id, "reset globe view");
        true
    }

    fn zoom_by(&mut self, factor: f64) -> bool {
        if !self.input_enabled() || !self.resolved.zoom.enabled {
            return false;
        }
        self.preempt_intro();
        let scale = self.projection.scale() * factor;
        self.commit_view(None, Some(scale));
        trace!(
            instance_id = %self.instance_id,
            scale = self.projection.scale(),
            "button zoom"
        );
        true
    }

    fn apply_drag_to(&mut self, point: (f64, f64)) {
        let Some((dx, dy)) = self.interaction.take_drag_delta(point) else {
            return;
        };
        let rotation = drag_rotation(self.projection.rotation(), dx, dy, self.projection.scale());
        self.commit_view(Some(rotation), None);
    }

    fn on_zoom_control(&self, x: f64, y: f64) -> bool {
        self.zoom_controls_visible() && ZoomControlsLayout::new(self.viewport).hit_test(x, y).is_some()
    }

    /// Stops a running intro in place: the current pose is kept, the intro
    /// counts as completed and idle rotation takes over.
    pub(super) fn preempt_intro(&mut self) {
        if !self.animation.cancel_intro() {
            return;
        }
        self.interaction.apply(GestureEvent::IntroEnd);
        self.mark_intro_complete();
        self.animation.idle_mut().start();
        debug!(instance_id = %self.instance_id, "intro preempted");
    }

    /// Hands control to a gesture. Idle rotation is suspended and its frame
    /// canceled before the gesture mutates anything.
    fn begin_gesture(&mut self, event: GestureEvent) -> bool {
        let mode = self.interaction.mode();
        if transition(mode, event).is_none() {
            return false;
        }
        self.preempt_intro();
        if self.animation.idle_mut().suspend() {
            trace!(instance_id = %self.instance_id, "suspended idle rotation");
        }
        self.animation.cancel_frame(self.host.scheduler.as_mut());
        if mode == GestureMode::WheelZooming {
            if let Some(timer) = self.timers.wheel_end.take() {
                self.host.scheduler.clear_timeout(timer);
            }
        }
        if let Some((previous, next)) = self.interaction.apply(event) {
            trace!(instance_id = %self.instance_id, ?previous, ?next, "gesture started");
        }
        true
    }

    /// Returns control to the animations; idle rotation resumes exactly once.
    pub(super) fn end_gesture(&mut self) {
        let Some((previous, _)) = self.interaction.apply(GestureEvent::GestureEnd) else {
            return;
        };
        if let Some(timer) = self.timers.wheel_end.take() {
            self.host.scheduler.clear_timeout(timer);
        }
        if self.animation.idle_mut().resume() {
            trace!(instance_id = %self.instance_id, ?previous, "resumed idle rotation");
        }
        self.write_cache();
        self.redraw();
        self.animation
            .ensure_frame(self.interaction.mode(), self.host.scheduler.as_mut());
    }
}
