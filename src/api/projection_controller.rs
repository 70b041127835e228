use tracing::{trace, warn};

use crate::core::ScaleBounds;
use crate::host::InstanceCacheEntry;
use crate::render::Renderer;

use super::GlobeEngine;

impl<R: Renderer> GlobeEngine<R> {
    #[must_use]
    pub fn scale_bounds(&self) -> ScaleBounds {
        self.projection.bounds()
    }

    /// Sets the scale programmatically, clamped to the current bounds.
    /// Stops a running intro the same way a zoom button does.
    pub fn set_scale(&mut self, scale: f64) -> f64 {
        if self.lifecycle.torn_down {
            return self.projection.scale();
        }
        self.preempt_intro();
        self.commit_view(None, Some(scale));
        self.projection.scale()
    }

    /// Sets the rotation programmatically; tilt is clamped to `[-90, 90]`.
    pub fn set_rotation(&mut self, rotation: [f64; 3]) -> [f64; 3] {
        if self.lifecycle.torn_down {
            return self.projection.rotation();
        }
        self.preempt_intro();
        self.commit_view(Some(rotation), None);
        self.projection.rotation()
    }

    /// The single mutation path for rotation and scale.
    ///
    /// Clamps, resynchronizes the cumulative zoom factor, redraws and writes
    /// the instance cache in one step. The cache is left alone while the
    /// intro is still interpolating.
    pub(super) fn commit_view(&mut self, rotation: Option<[f64; 3]>, scale: Option<f64>) {
        if self.lifecycle.torn_down {
            return;
        }
        if let Some(rotation) = rotation {
            self.projection.set_rotation(rotation);
        }
        if let Some(scale) = scale {
            self.projection.set_scale(scale);
        }
        self.interaction.set_zoom_factor(self.projection.zoom_factor());
        self.redraw();
        if !self.animation.intro_running() {
            self.write_cache();
        }
    }

    pub(super) fn write_cache(&mut self) {
        let entry = InstanceCacheEntry {
            rotation: self.projection.rotation(),
            scale: self.projection.scale(),
        };
        match self.host.cache.try_borrow_mut() {
            Ok(mut cache) => {
                cache.put(&self.instance_id, entry);
                trace!(
                    instance_id = %self.instance_id,
                    lambda = entry.rotation[0],
                    scale = entry.scale,
                    "wrote instance cache"
                );
            }
            Err(err) => warn!(
                instance_id = %self.instance_id,
                error = %err,
                "instance cache busy, skipping write"
            ),
        }
    }

    pub(super) fn mark_intro_complete(&mut self) {
        match self.host.cache.try_borrow_mut() {
            Ok(mut cache) => cache.mark_animation_complete(&self.instance_id),
            Err(err) => warn!(
                instance_id = %self.instance_id,
                error = %err,
                "instance cache busy, intro completion not recorded"
            ),
        }
    }

    pub(super) fn intro_already_complete(&self) -> bool {
        self.host
            .cache
            .try_borrow()
            .is_ok_and(|cache| cache.is_animation_complete(&self.instance_id))
    }
}
