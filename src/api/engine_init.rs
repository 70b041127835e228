use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::animation::AnimationScheduler;
use crate::core::{ProjectionState, Viewport, WorldGeometry};
use crate::error::{GlobeError, GlobeResult};
use crate::host::HostBindings;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::{
    GlobeConfig, GlobeEngine, ResolvedConfig, data_controller::DataState,
    lifecycle::LifecycleState, render_coordinator::ProjectedScene,
    resize_controller::PendingTimers,
};

/// Where the country geometry comes from. Parsed at first paint.
#[derive(Debug, Clone)]
pub enum GeometrySource {
    /// GeoJSON `FeatureCollection` text.
    GeoJson(String),
    /// Geometry already parsed and possibly shared between instances.
    Loaded(Rc<WorldGeometry>),
}

#[derive(Debug)]
pub(super) struct GeometryState {
    pub(super) source: GeometrySource,
    pub(super) world: Option<Rc<WorldGeometry>>,
    pub(super) load_error: Option<String>,
}

/// Everything needed to mount one visualization instance.
#[derive(Debug, Clone)]
pub struct GlobeMount {
    pub instance_id: String,
    pub viewport: Viewport,
    pub config: GlobeConfig,
    pub geometry: GeometrySource,
    /// Seed for the `random` variation method; entropy when `None`.
    pub variation_seed: Option<u64>,
}

impl GlobeMount {
    #[must_use]
    pub fn new(instance_id: impl Into<String>, viewport: Viewport, geometry: GeometrySource) -> Self {
        Self {
            instance_id: instance_id.into(),
            viewport,
            config: GlobeConfig::default(),
            geometry,
            variation_seed: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: GlobeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_variation_seed(mut self, seed: u64) -> Self {
        self.variation_seed = Some(seed);
        self
    }
}

impl<R: Renderer> GlobeEngine<R> {
    /// Creates an engine for one visualization instance.
    ///
    /// Configuration is normalized here once. Projection state resumes from
    /// the injected instance cache when an entry exists. Nothing is drawn
    /// and no frame is requested until the first [`GlobeEngine::paint`].
    pub fn new(renderer: R, mount: GlobeMount, host: HostBindings) -> GlobeResult<Self> {
        if !mount.viewport.is_valid() {
            return Err(GlobeError::InvalidViewport {
                width: mount.viewport.width,
                height: mount.viewport.height,
            });
        }

        let resolved = ResolvedConfig::resolve(&mount.config);
        let cached = host
            .cache
            .borrow()
            .get(&mount.instance_id)
            .map(|entry| (entry.rotation, entry.scale));
        let projection = ProjectionState::setup(
            mount.viewport,
            resolved.zoom.min_factor,
            resolved.zoom.max_factor,
            resolved.zoom.initial_factor,
            cached,
        );
        let mut interaction = InteractionState::default();
        interaction.set_zoom_factor(projection.zoom_factor());
        let rng = match mount.variation_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        debug!(
            instance_id = %mount.instance_id,
            width = mount.viewport.width,
            height = mount.viewport.height,
            resumed = cached.is_some(),
            scale = projection.scale(),
            "created globe engine"
        );

        Ok(Self {
            renderer,
            instance_id: mount.instance_id,
            viewport: mount.viewport,
            animation: AnimationScheduler::new(resolved.rotation_speed),
            config: mount.config,
            resolved,
            host,
            geometry: GeometryState {
                source: mount.geometry,
                world: None,
                load_error: None,
            },
            projection,
            interaction,
            data: DataState::default(),
            timers: PendingTimers::default(),
            lifecycle: LifecycleState::default(),
            scene: ProjectedScene::default(),
            rng,
        })
    }
}
