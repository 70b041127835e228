use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::animation::{IdleRotation, IntroAnimation};
use crate::host::{FrameHandle, HostScheduler};
use crate::interaction::GestureMode;

/// Animation entitled to the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameTurn {
    Intro,
    Idle,
}

/// Single frame loop shared by the intro and idle rotation.
///
/// At most one host frame is pending at any time. Each frame polls
/// [`AnimationScheduler::turn`] instead of keeping one loop per animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationScheduler {
    intro: Option<IntroAnimation>,
    idle: IdleRotation,
    pending_frame: Option<FrameHandle>,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new(idle_speed: f64) -> Self {
        Self {
            intro: None,
            idle: IdleRotation::new(idle_speed),
            pending_frame: None,
        }
    }

    #[must_use]
    pub fn intro(&self) -> Option<&IntroAnimation> {
        self.intro.as_ref()
    }

    pub fn intro_mut(&mut self) -> Option<&mut IntroAnimation> {
        self.intro.as_mut()
    }

    pub fn set_intro(&mut self, intro: IntroAnimation) {
        self.intro = Some(intro);
    }

    #[must_use]
    pub fn intro_running(&self) -> bool {
        self.intro.as_ref().is_some_and(IntroAnimation::is_running)
    }

    /// Idempotent; returns true only when a running intro was stopped.
    pub fn cancel_intro(&mut self) -> bool {
        self.intro.as_mut().is_some_and(IntroAnimation::cancel)
    }

    #[must_use]
    pub fn idle(&self) -> &IdleRotation {
        &self.idle
    }

    pub fn idle_mut(&mut self) -> &mut IdleRotation {
        &mut self.idle
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    /// Gestures own every frame they are active in; otherwise the intro
    /// goes before idle rotation.
    #[must_use]
    pub fn turn(&self, mode: GestureMode) -> Option<FrameTurn> {
        if mode.is_gesture() {
            return None;
        }
        if self.intro_running() {
            return Some(FrameTurn::Intro);
        }
        self.idle.is_active().then_some(FrameTurn::Idle)
    }

    /// Requests a frame when some animation wants one and none is pending.
    pub fn ensure_frame(&mut self, mode: GestureMode, host: &mut dyn HostScheduler) -> bool {
        if self.pending_frame.is_some() || self.turn(mode).is_none() {
            return false;
        }
        let handle = host.request_frame();
        trace!(frame = handle.0, "requested animation frame");
        self.pending_frame = Some(handle);
        true
    }

    /// Cancels the pending frame, if any. Safe to call repeatedly.
    pub fn cancel_frame(&mut self, host: &mut dyn HostScheduler) -> bool {
        match self.pending_frame.take() {
            Some(handle) => {
                host.cancel_frame(handle);
                trace!(frame = handle.0, "canceled animation frame");
                true
            }
            None => false,
        }
    }

    /// Marks the pending frame as delivered.
    pub fn frame_fired(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }
}
