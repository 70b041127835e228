use std::rc::Rc;

use tracing::{debug, warn};

use crate::animation::{IntroAnimation, IntroPose};
use crate::core::{ScaleBounds, WorldGeometry, globe_radius};
use crate::data::QueryResult;
use crate::error::{GlobeError, GlobeResult};
use crate::interaction::{GestureEvent, GestureMode};
use crate::render::Renderer;

use super::render_coordinator::placeholder_frame;
use super::{GeometrySource, GlobeConfig, GlobeEngine, ResolvedConfig};

impl<R: Renderer> GlobeEngine<R> {
    /// Paints the instance with the latest host query result.
    ///
    /// The first successful paint loads the geometry, attaches input
    /// handling and starts the intro fly-in (or idle rotation when the
    /// intro already ran or is disabled). Later paints only refresh the
    /// data-derived state and redraw.
    ///
    /// Returns `GlobeError::GeometryAsset` after drawing a placeholder when
    /// the country geometry cannot be loaded; a later paint retries.
    pub fn paint(&mut self, query: Option<QueryResult>) -> GlobeResult<()> {
        if self.lifecycle.torn_down {
            warn!(instance_id = %self.instance_id, "paint after teardown ignored");
            return Ok(());
        }
        self.data.query = query;

        if let Err(err) = self.ensure_geometry() {
            let frame = placeholder_frame(self.viewport);
            if let Err(render_err) = self.renderer.render(&frame) {
                warn!(
                    instance_id = %self.instance_id,
                    error = %render_err,
                    "failed to draw error placeholder"
                );
            }
            return Err(err);
        }

        self.refresh_data();
        if !self.lifecycle.listeners_attached {
            self.lifecycle.listeners_attached = true;
            self.begin_animations();
        }

        self.render()?;
        self.animation
            .ensure_frame(self.interaction.mode(), self.host.scheduler.as_mut());
        debug!(
            instance_id = %self.instance_id,
            mode = ?self.interaction.mode(),
            scale = self.projection.scale(),
            "painted globe"
        );
        Ok(())
    }

    /// Applies a new configuration without replaying the intro.
    ///
    /// Zoom bounds, colors, coloring mode and rotation speed take effect
    /// immediately. An active wheel zoom ends when continuous zoom is turned
    /// off.
    pub fn update_config(&mut self, config: GlobeConfig) {
        if self.lifecycle.torn_down {
            return;
        }
        let resolved = ResolvedConfig::resolve(&config);
        let zoom_changed = resolved.zoom.min_factor != self.resolved.zoom.min_factor
            || resolved.zoom.max_factor != self.resolved.zoom.max_factor
            || resolved.zoom.initial_factor != self.resolved.zoom.initial_factor;
        self.config = config;
        self.resolved = resolved;

        if zoom_changed {
            let zoom = self.resolved.zoom;
            let bounds = ScaleBounds::from_radius(
                globe_radius(self.viewport),
                zoom.min_factor,
                zoom.max_factor,
                zoom.initial_factor,
            );
            self.projection.rebound(bounds, 1.0);
        }
        self.animation
            .idle_mut()
            .set_speed(self.resolved.rotation_speed);
        if self.interaction.mode() == GestureMode::WheelZooming
            && !self.resolved.zoom.continuous_enabled()
        {
            self.end_gesture();
        }

        self.refresh_data();
        if self.lifecycle.listeners_attached {
            self.commit_view(None, None);
            self.animation
                .ensure_frame(self.interaction.mode(), self.host.scheduler.as_mut());
        }
        debug!(
            instance_id = %self.instance_id,
            rotation_speed = self.resolved.rotation_speed,
            corrections = self.resolved.corrections.len(),
            "updated globe config"
        );
    }

    fn ensure_geometry(&mut self) -> GlobeResult<()> {
        if self.geometry.world.is_some() {
            return Ok(());
        }
        let loaded = match &self.geometry.source {
            GeometrySource::GeoJson(text) => WorldGeometry::from_geojson_str(text).map(Rc::new),
            GeometrySource::Loaded(world) if world.is_empty() => Err(GlobeError::GeometryAsset(
                "geometry contains no features".to_owned(),
            )),
            GeometrySource::Loaded(world) => Ok(Rc::clone(world)),
        };
        match loaded {
            Ok(world) => {
                debug!(
                    instance_id = %self.instance_id,
                    countries = world.len(),
                    "globe geometry ready"
                );
                self.geometry.world = Some(world);
                self.geometry.load_error = None;
                self.scene.invalidate();
                Ok(())
            }
            Err(err) => {
                warn!(instance_id = %self.instance_id, error = %err, "globe geometry unavailable");
                self.geometry.load_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn begin_animations(&mut self) {
        let intro = self.resolved.animation;
        if intro.enabled && !self.intro_already_complete() {
            let target = IntroPose::new(self.projection.rotation(), self.projection.scale());
            let from = IntroPose::new(intro.start_rotation, target.scale * intro.start_scale_factor);
            self.animation
                .set_intro(IntroAnimation::new(from, target, intro.duration_ms));
            self.interaction.apply(GestureEvent::IntroStart);
            self.projection.set_rotation(from.rotation);
            self.projection.set_scale(from.scale);
            self.interaction.set_zoom_factor(self.projection.zoom_factor());
            debug!(
                instance_id = %self.instance_id,
                duration_ms = intro.duration_ms,
                "starting intro fly-in"
            );
        } else {
            if !intro.enabled {
                self.mark_intro_complete();
            }
            self.animation.idle_mut().start();
        }
    }
}
