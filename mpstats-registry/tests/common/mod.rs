//! Shared test helpers for registry tests.

#![allow(dead_code)]

use mpstats_store::{EntityStore, MemoryStore, StoreError, StoreResult};
use mpstats_types::{NamedEntity, RepositoryId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Installs a test-friendly tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

/// A [`MemoryStore`] whose writes can be made to fail on demand, and which
/// counts how often the registry reached for it.
pub struct FlakyStore<T> {
    pub inner: MemoryStore<T>,
    pub fail_inserts: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub insert_calls: AtomicUsize,
    pub read_calls: AtomicUsize,
}

impl<T: NamedEntity> FlakyStore<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::new(),
            fail_inserts: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            insert_calls: AtomicUsize::new(0),
            read_calls: AtomicUsize::new(0),
        })
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }
}

impl<T: NamedEntity> EntityStore<T> for FlakyStore<T> {
    fn insert(&self, attributes: &T::Attributes) -> StoreResult<RepositoryId> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Storage("injected insert failure".into()));
        }
        self.inner.insert(attributes)
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<T>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_name(name)
    }

    fn find_by_id(&self, id: RepositoryId) -> StoreResult<Option<T>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id)
    }

    fn list_all(&self) -> StoreResult<Vec<T>> {
        self.inner.list_all()
    }

    fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Storage("injected delete failure".into()));
        }
        self.inner.delete_by_name(name)
    }
}
