use tracing::{debug, trace};

use crate::animation::{FrameTurn, IntroPhase};
use crate::interaction::GestureEvent;
use crate::render::Renderer;

use super::GlobeEngine;

impl<R: Renderer> GlobeEngine<R> {
    /// Host callback for a frame requested through `HostScheduler`.
    ///
    /// Runs whichever animation owns this frame, commits the result and
    /// requests the next frame only after the redraw finished.
    pub fn on_animation_frame(&mut self, timestamp_ms: f64) {
        self.animation.frame_fired();
        if self.lifecycle.torn_down {
            return;
        }
        match self.animation.turn(self.interaction.mode()) {
            Some(FrameTurn::Intro) => self.step_intro(timestamp_ms),
            Some(FrameTurn::Idle) => self.step_idle(timestamp_ms),
            None => {}
        }
        self.animation
            .ensure_frame(self.interaction.mode(), self.host.scheduler.as_mut());
    }

    /// Stops the intro without rolling back the pose. Idempotent.
    pub fn cancel_intro(&mut self) -> bool {
        let canceled = self.animation.cancel_intro();
        if canceled {
            self.interaction.apply(GestureEvent::IntroEnd);
            debug!(instance_id = %self.instance_id, "intro canceled");
        }
        canceled
    }

    #[must_use]
    pub fn intro_phase(&self) -> Option<IntroPhase> {
        self.animation.intro().map(|intro| intro.phase())
    }

    #[must_use]
    pub fn idle_rotation_active(&self) -> bool {
        self.animation.idle().is_active()
    }

    fn step_intro(&mut self, timestamp_ms: f64) {
        let Some(frame) = self
            .animation
            .intro_mut()
            .and_then(|intro| intro.step(timestamp_ms))
        else {
            return;
        };
        self.commit_view(Some(frame.pose.rotation), Some(frame.pose.scale));
        if frame.finished {
            self.mark_intro_complete();
            self.interaction.apply(GestureEvent::IntroEnd);
            self.animation.idle_mut().start_at(timestamp_ms);
            debug!(
                instance_id = %self.instance_id,
                scale = self.projection.scale(),
                "intro completed"
            );
        }
    }

    fn step_idle(&mut self, timestamp_ms: f64) {
        let Some(degrees) = self.animation.idle_mut().step(timestamp_ms) else {
            return;
        };
        if degrees == 0.0 {
            return;
        }
        self.projection.advance_lambda(degrees);
        self.refresh_hover_target();
        self.commit_view(None, None);
        trace!(
            instance_id = %self.instance_id,
            lambda = self.projection.rotation()[0],
            "idle rotation step"
        );
    }
}
