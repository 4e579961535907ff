//! Process-local store for a single entity kind.

use crate::{EntityStore, StoreError, StoreResult};
use mpstats_types::{EntityAttributes, NamedEntity, RepositoryId, fold_name};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

struct Rows<T> {
    by_id: BTreeMap<RepositoryId, T>,
    next_id: i64,
}

/// In-memory [`EntityStore`].
///
/// Ids start at 1 and are never reused, even after a delete. Cross-kind
/// references (a game's category) are not checked here.
pub struct MemoryStore<T> {
    rows: Mutex<Rows<T>>,
    inserts: AtomicUsize,
}

impl<T: NamedEntity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Rows {
                by_id: BTreeMap::new(),
                next_id: 1,
            }),
            inserts: AtomicUsize::new(0),
        }
    }

    /// Number of successful inserts over the store's lifetime.
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.by_id.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Rows<T>>> {
        self.rows
            .lock()
            .map_err(|e| StoreError::Storage(format!("memory store lock poisoned: {e}")))
    }
}

impl<T: NamedEntity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NamedEntity> EntityStore<T> for MemoryStore<T> {
    fn insert(&self, attributes: &T::Attributes) -> StoreResult<RepositoryId> {
        let mut rows = self.lock()?;
        let key = attributes.name_key();
        if rows.by_id.values().any(|row| row.name_key() == key) {
            return Err(StoreError::UniqueViolation {
                kind: T::KIND,
                name: attributes.name().to_string(),
            });
        }

        let id = RepositoryId::new(rows.next_id);
        rows.next_id += 1;
        rows.by_id.insert(id, T::from_attributes(id, attributes.clone()));
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<T>> {
        let key = fold_name(name);
        let rows = self.lock()?;
        Ok(rows.by_id.values().find(|row| row.name_key() == key).cloned())
    }

    fn find_by_id(&self, id: RepositoryId) -> StoreResult<Option<T>> {
        Ok(self.lock()?.by_id.get(&id).cloned())
    }

    fn list_all(&self) -> StoreResult<Vec<T>> {
        Ok(self.lock()?.by_id.values().cloned().collect())
    }

    fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        let key = fold_name(name);
        let mut rows = self.lock()?;
        rows.by_id.retain(|_, row| row.name_key() != key);
        Ok(())
    }
}
