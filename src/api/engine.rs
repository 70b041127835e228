use rand::rngs::StdRng;

use crate::animation::AnimationScheduler;
use crate::core::{ProjectionState, Viewport};
use crate::error::GlobeResult;
use crate::host::HostBindings;
use crate::interaction::{GestureMode, InteractionState};
use crate::render::Renderer;

use super::{
    GlobeConfig, ResolvedConfig, data_controller::DataState, engine_init::GeometryState,
    lifecycle::LifecycleState, render_coordinator::ProjectedScene,
    resize_controller::PendingTimers,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main facade consumed by host applications, one per visualization
/// instance.
///
/// `GlobeEngine` owns the projection state and coordinates gestures, the
/// intro/idle animations, data-driven coloring and renderer calls. Every
/// state change funnels through one commit path that redraws and writes the
/// instance cache in the same step.
pub struct GlobeEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) instance_id: String,
    pub(super) viewport: Viewport,
    pub(super) config: GlobeConfig,
    pub(super) resolved: ResolvedConfig,
    pub(super) host: HostBindings,
    pub(super) geometry: GeometryState,
    pub(super) projection: ProjectionState,
    pub(super) interaction: InteractionState,
    pub(super) animation: AnimationScheduler,
    pub(super) data: DataState,
    pub(super) timers: PendingTimers,
    pub(super) lifecycle: LifecycleState,
    pub(super) scene: ProjectedScene,
    pub(super) rng: StdRng,
}

impl<R: Renderer> GlobeEngine<R> {
    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    #[must_use]
    pub fn resolved_config(&self) -> &ResolvedConfig {
        &self.resolved
    }

    #[must_use]
    pub fn projection_state(&self) -> ProjectionState {
        self.projection
    }

    #[must_use]
    pub fn rotation(&self) -> [f64; 3] {
        self.projection.rotation()
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.projection.scale()
    }

    /// `round(scale / defaultScale * 100)`, as shown by the zoom indicator.
    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        self.projection.zoom_percent()
    }

    #[must_use]
    pub fn gesture_mode(&self) -> GestureMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Draws the current state. Interactive paths call this internally and
    /// log renderer failures instead of returning them.
    pub fn render(&mut self) -> GlobeResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)
    }

    /// Renders the current frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> GlobeResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }
}
