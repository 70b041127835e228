use std::cell::RefCell;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Last committed pose of one visualization instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstanceCacheEntry {
    pub rotation: [f64; 3],
    pub scale: f64,
}

/// Session-lifetime view state keyed by visualization instance id.
///
/// Entries are never evicted; cardinality follows the number of open
/// instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceStateCache {
    entries: IndexMap<String, InstanceCacheEntry>,
    completed_intros: IndexSet<String>,
}

/// Store shared between the hosting layer and every engine it mounts.
pub type SharedInstanceCache = Rc<RefCell<InstanceStateCache>>;

impl InstanceStateCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shared() -> SharedInstanceCache {
        Rc::new(RefCell::new(Self::new()))
    }

    #[must_use]
    pub fn get(&self, instance_id: &str) -> Option<InstanceCacheEntry> {
        self.entries.get(instance_id).copied()
    }

    pub fn put(&mut self, instance_id: &str, entry: InstanceCacheEntry) {
        self.entries.insert(instance_id.to_owned(), entry);
    }

    pub fn mark_animation_complete(&mut self, instance_id: &str) {
        self.completed_intros.insert(instance_id.to_owned());
    }

    #[must_use]
    pub fn is_animation_complete(&self, instance_id: &str) -> bool {
        self.completed_intros.contains(instance_id)
    }

    /// Clears the completion flag so the intro replays on the next mount.
    pub fn reset(&mut self, instance_id: &str) {
        self.completed_intros.shift_remove(instance_id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{InstanceCacheEntry, InstanceStateCache};

    #[test]
    fn reset_clears_only_the_completion_flag() {
        let mut cache = InstanceStateCache::new();
        let entry = InstanceCacheEntry {
            rotation: [10.0, -25.0, 0.0],
            scale: 120.0,
        };
        cache.put("globe-1", entry);
        cache.mark_animation_complete("globe-1");
        assert!(cache.is_animation_complete("globe-1"));
        assert!(!cache.is_animation_complete("globe-2"));

        cache.reset("globe-1");
        assert!(!cache.is_animation_complete("globe-1"));
        assert_eq!(cache.get("globe-1"), Some(entry));
        cache.reset("never-seen");
    }
}
