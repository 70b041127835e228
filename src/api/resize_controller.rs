use tracing::{debug, trace};

use crate::core::{ScaleBounds, Viewport, globe_radius};
use crate::error::{GlobeError, GlobeResult};
use crate::host::TimerHandle;
use crate::interaction::GestureMode;
use crate::render::Renderer;

use super::GlobeEngine;

/// Quiet period before a resize is applied.
pub const RESIZE_DEBOUNCE_MS: f64 = 100.0;

/// Host timeouts owned by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct PendingTimers {
    pub(super) resize: Option<(TimerHandle, Viewport)>,
    pub(super) wheel_end: Option<TimerHandle>,
}

impl PendingTimers {
    pub(super) fn count(&self) -> usize {
        usize::from(self.resize.is_some()) + usize::from(self.wheel_end.is_some())
    }
}

impl<R: Renderer> GlobeEngine<R> {
    /// Records a new viewport size and (re)starts the resize debounce.
    pub fn resize(&mut self, width: u32, height: u32) -> GlobeResult<()> {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return Err(GlobeError::InvalidViewport { width, height });
        }
        if self.lifecycle.torn_down {
            return Ok(());
        }
        if let Some((previous, _)) = self.timers.resize.take() {
            self.host.scheduler.clear_timeout(previous);
        }
        let handle = self.host.scheduler.set_timeout(RESIZE_DEBOUNCE_MS);
        self.timers.resize = Some((handle, viewport));
        trace!(instance_id = %self.instance_id, width, height, "resize debounced");
        Ok(())
    }

    /// Host callback for a timeout set through `HostScheduler`. Unknown or
    /// stale handles are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle, now_ms: f64) {
        if self.lifecycle.torn_down {
            return;
        }
        trace!(instance_id = %self.instance_id, timer = handle.0, now_ms, "timer fired");
        if let Some((pending, viewport)) = self.timers.resize {
            if pending == handle {
                self.timers.resize = None;
                self.apply_resize(viewport);
                return;
            }
        }
        if self.timers.wheel_end == Some(handle) {
            self.timers.wheel_end = None;
            if self.interaction.mode() == GestureMode::WheelZooming {
                self.end_gesture();
            }
        }
    }

    /// Rebuilds the scale bounds for the new radius. Scale keeps its ratio
    /// to the radius, rotation is untouched and a running intro is rescaled
    /// by the same ratio.
    fn apply_resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        let old_radius = globe_radius(self.viewport);
        let new_radius = globe_radius(viewport);
        let ratio = new_radius / old_radius;
        let zoom = self.resolved.zoom;
        let bounds = ScaleBounds::from_radius(
            new_radius,
            zoom.min_factor,
            zoom.max_factor,
            zoom.initial_factor,
        );

        self.viewport = viewport;
        self.projection.rebound(bounds, ratio);
        if let Some(intro) = self.animation.intro_mut() {
            intro.rescale(ratio);
        }
        self.scene.invalidate();
        self.commit_view(None, None);
        debug!(
            instance_id = %self.instance_id,
            width = viewport.width,
            height = viewport.height,
            ratio,
            scale = self.projection.scale(),
            "applied resize"
        );
    }
}
