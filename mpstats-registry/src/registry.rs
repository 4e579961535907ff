//! The generic get-or-create registry.
//!
//! A [`Registry`] owns a [`NameIndex`] and writes through to an
//! [`EntityStore`]. Reads are served from the index only; the index is
//! authoritative because every mutation goes to the store first and is
//! published to the index only after the store accepted it.
//!
//! # Concurrency
//!
//! Mutations (`get_or_create`, `delete`) are serialized by a per-registry
//! writer lock held across the whole "check index, write store, publish"
//! sequence. Two callers racing on the same unseen name therefore perform a
//! single store insert: the second one re-checks the index after acquiring the
//! lock and finds the first one's record. Readers only take the index lock
//! long enough to copy one entry out, so they never wait on a store call.

use crate::error::{RegistryError, RegistryResult};
use crate::index::NameIndex;
use mpstats_store::EntityStore;
use mpstats_types::{EntityAttributes, NamedEntity, RepositoryId};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use tracing::{debug, info, warn};

/// Cached, case-insensitive registry for one entity kind.
pub struct Registry<T: NamedEntity> {
    index: RwLock<NameIndex<T>>,
    writer: Mutex<()>,
    store: Arc<dyn EntityStore<T>>,
}

impl<T: NamedEntity> Registry<T> {
    /// Creates a registry and hydrates its index from everything already in
    /// `store`. An empty store is fine.
    pub fn new(store: Arc<dyn EntityStore<T>>) -> RegistryResult<Self> {
        let registry = Self {
            index: RwLock::new(NameIndex::new()),
            writer: Mutex::new(()),
            store,
        };
        registry.initialize()?;
        Ok(registry)
    }

    fn initialize(&self) -> RegistryResult<()> {
        let rows = self.store.list_all()?;
        let mut index = self.write_index();
        for row in rows {
            let id = row.repository_id();
            if let Some(replaced) = index.put(row) {
                warn!(
                    "Store holds several {} rows for {:?} (ids {} and {}), keeping {}",
                    T::KIND,
                    replaced.name(),
                    replaced.repository_id(),
                    id,
                    id
                );
            }
        }
        info!("Loaded {} {} record(s) from store", index.len(), T::KIND);
        Ok(())
    }

    // Poisoning is recovered from: the index is only ever changed by whole-entry
    // put/remove calls, so a panicking holder cannot leave it half-updated.
    fn read_index(&self) -> RwLockReadGuard<'_, NameIndex<T>> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_index(&self) -> RwLockWriteGuard<'_, NameIndex<T>> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True if a record with this name exists, ignoring case.
    pub fn has(&self, name: &str) -> bool {
        self.read_index().contains(name)
    }

    /// Returns the record registered under `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<T> {
        self.read_index().get(name).cloned()
    }

    /// Returns the record with the given store id.
    pub fn get_by_id(&self, id: RepositoryId) -> Option<T> {
        self.read_index().get_by_id(id).cloned()
    }

    /// Like [`get`](Self::get), but absence is an error.
    pub fn require(&self, name: &str) -> RegistryResult<T> {
        self.get(name).ok_or_else(|| RegistryError::NotFound {
            kind: T::KIND,
            name: name.to_string(),
        })
    }

    /// Returns the record registered under `attributes`' name, creating it
    /// first if it does not exist.
    ///
    /// When the record already exists the given attributes are ignored. A
    /// failed store insert leaves the index unchanged and is returned as is;
    /// retrying is up to the caller.
    pub fn get_or_create(&self, attributes: T::Attributes) -> RegistryResult<T> {
        if let Some(existing) = self.get(attributes.name()) {
            return Ok(existing);
        }

        let _writer = self.lock_writer();
        // Another writer may have created it while we waited.
        if let Some(existing) = self.get(attributes.name()) {
            return Ok(existing);
        }

        let id = self.store.insert(&attributes).map_err(|e| {
            warn!("Failed to insert {} {:?}: {}", T::KIND, attributes.name(), e);
            e
        })?;
        let record = T::from_attributes(id, attributes);
        self.write_index().put(record.clone());
        debug!("Created {} {:?} with id {}", T::KIND, record.name(), id);
        Ok(record)
    }

    /// Deletes the record registered under `name`, ignoring case.
    ///
    /// The store row goes first; the index entry is dropped only once the
    /// store delete succeeded. Deleting an unknown name does nothing.
    pub fn delete(&self, name: &str) -> RegistryResult<()> {
        let _writer = self.lock_writer();
        if !self.has(name) {
            return Ok(());
        }

        self.store.delete_by_name(name).map_err(|e| {
            warn!("Failed to delete {} {:?}: {}", T::KIND, name, e);
            e
        })?;
        if let Some(removed) = self.write_index().remove(name) {
            debug!("Deleted {} {:?} (id {})", T::KIND, removed.name(), removed.repository_id());
        }
        Ok(())
    }

    /// Snapshot of every registered record, in no particular order.
    pub fn list(&self) -> Vec<T> {
        self.read_index().all().cloned().collect()
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.read_index().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_index().is_empty()
    }
}
