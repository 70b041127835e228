use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interaction::GestureEvent;
use crate::render::Renderer;

use super::GlobeEngine;

/// One teardown step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownStep {
    ClearTimers { count: usize },
    CancelIntro { was_running: bool },
    StopIdleRotation { frame_canceled: bool },
    DetachListeners,
    RemoveTooltip { was_visible: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownReport {
    pub steps: Vec<TeardownStep>,
    /// True when this call found the engine already torn down and did
    /// nothing.
    pub already_torn_down: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct LifecycleState {
    pub(super) listeners_attached: bool,
    pub(super) torn_down: bool,
    pub(super) tooltip_visible: bool,
}

impl<R: Renderer> GlobeEngine<R> {
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.lifecycle.torn_down
    }

    /// Input is accepted between the first successful paint and teardown.
    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.lifecycle.listeners_attached && !self.lifecycle.torn_down
    }

    /// Releases every pending host callback. Safe to call repeatedly; only
    /// the first call does work. Also runs on drop.
    pub fn teardown(&mut self) -> TeardownReport {
        if self.lifecycle.torn_down {
            return TeardownReport {
                steps: Vec::new(),
                already_torn_down: true,
            };
        }
        let mut steps = Vec::with_capacity(5);

        let count = self.timers.count();
        if let Some((handle, _)) = self.timers.resize.take() {
            self.host.scheduler.clear_timeout(handle);
        }
        if let Some(handle) = self.timers.wheel_end.take() {
            self.host.scheduler.clear_timeout(handle);
        }
        steps.push(TeardownStep::ClearTimers { count });

        let was_running = self.animation.cancel_intro();
        if was_running {
            self.interaction.apply(GestureEvent::IntroEnd);
        }
        steps.push(TeardownStep::CancelIntro { was_running });

        self.animation.idle_mut().stop();
        let frame_canceled = self.animation.cancel_frame(self.host.scheduler.as_mut());
        steps.push(TeardownStep::StopIdleRotation { frame_canceled });

        self.lifecycle.listeners_attached = false;
        self.interaction.clear_inputs();
        steps.push(TeardownStep::DetachListeners);

        let was_visible = std::mem::take(&mut self.lifecycle.tooltip_visible);
        steps.push(TeardownStep::RemoveTooltip { was_visible });

        self.lifecycle.torn_down = true;
        debug!(instance_id = %self.instance_id, ?steps, "globe torn down");
        TeardownReport {
            steps,
            already_torn_down: false,
        }
    }
}

impl<R: Renderer> Drop for GlobeEngine<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
