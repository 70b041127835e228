pub mod instance_cache;
pub mod scheduler;
pub mod selection;

pub use instance_cache::{InstanceCacheEntry, InstanceStateCache, SharedInstanceCache};
pub use scheduler::{FrameHandle, HostScheduler, ManualScheduler, SchedulerCall, TimerHandle};
pub use selection::{RecordingSelectionHost, SelectionHost, SelectionRequest};

/// Collaborators injected into an engine at mount time.
pub struct HostBindings {
    pub scheduler: Box<dyn HostScheduler>,
    pub selection: Box<dyn SelectionHost>,
    pub cache: SharedInstanceCache,
}

impl HostBindings {
    #[must_use]
    pub fn new(
        scheduler: Box<dyn HostScheduler>,
        selection: Box<dyn SelectionHost>,
        cache: SharedInstanceCache,
    ) -> Self {
        Self {
            scheduler,
            selection,
            cache,
        }
    }
}

impl std::fmt::Debug for HostBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBindings")
            .field(
                "cache_entries",
                &self.cache.try_borrow().map(|cache| cache.len()).ok(),
            )
            .finish_non_exhaustive()
    }
}
