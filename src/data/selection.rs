use indexmap::IndexSet;
use tracing::trace;

use crate::core::WorldGeometry;
use crate::data::QueryResult;

/// Uppercase names of the countries the host currently reports as selected
/// or locked. Rebuilt on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    keys: IndexSet<String>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the set from rows flagged selected/locked. Names unknown to
    /// the geometry index are ignored.
    #[must_use]
    pub fn from_query(query: Option<&QueryResult>, world: &WorldGeometry) -> Self {
        let Some(query) = query else {
            return Self::default();
        };
        let mut ignored = 0usize;
        let keys = query
            .rows
            .iter()
            .filter_map(|row| row.dimension())
            .filter(|cell| cell.selection_state.is_selected())
            .filter_map(|cell| cell.usable_text())
            .map(str::to_uppercase)
            .filter(|key| {
                let known = world.contains_key(key);
                if !known {
                    ignored += 1;
                }
                known
            })
            .collect::<IndexSet<_>>();
        trace!(selected = keys.len(), ignored, "derived selection set");
        Self { keys }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl FromIterator<String> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().map(|key| key.to_uppercase()).collect(),
        }
    }
}
