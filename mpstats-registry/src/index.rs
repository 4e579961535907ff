//! Case-insensitive in-memory name index.

use mpstats_types::{NamedEntity, RepositoryId, fold_name};
use std::collections::HashMap;

/// Maps folded names to records, with a secondary id lookup.
///
/// The index stores whatever it is given. Keeping two records from sharing a
/// folded name is the owning [`Registry`](crate::Registry)'s job.
#[derive(Debug, Clone)]
pub struct NameIndex<T> {
    by_key: HashMap<String, T>,
    key_by_id: HashMap<RepositoryId, String>,
}

impl<T: NamedEntity> NameIndex<T> {
    pub fn new() -> Self {
        Self {
            by_key: HashMap::new(),
            key_by_id: HashMap::new(),
        }
    }

    /// Stores `record` under its folded name, returning the record it replaced.
    pub fn put(&mut self, record: T) -> Option<T> {
        let key = record.name_key();
        let id = record.repository_id();
        let previous = self.by_key.insert(key.clone(), record);
        if let Some(prev) = &previous {
            self.key_by_id.remove(&prev.repository_id());
        }
        self.key_by_id.insert(id, key);
        previous
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.by_key.get(&fold_name(name))
    }

    pub fn get_by_id(&self, id: RepositoryId) -> Option<&T> {
        self.key_by_id.get(&id).and_then(|key| self.by_key.get(key))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_key.contains_key(&fold_name(name))
    }

    /// Removes the record registered under `name`, if any.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let removed = self.by_key.remove(&fold_name(name))?;
        self.key_by_id.remove(&removed.repository_id());
        Some(removed)
    }

    /// Every record, in no particular order. Call again to restart.
    pub fn all(&self) -> impl Iterator<Item = &T> + Clone {
        self.by_key.values()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl<T: NamedEntity> Default for NameIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
