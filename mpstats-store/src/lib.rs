//! Persistent stores backing the mpstats entity registries.
//!
//! A registry never talks to a database directly. It goes through the
//! [`EntityStore`] contract, which this crate implements twice:
//!
//! - [`SqliteStore`]: one SQLite database holding every entity kind in its
//!   own table. Each table has a `UNIQUE` folded-name column, so duplicate
//!   names are rejected even when several processes share the file.
//! - [`MemoryStore`]: a single-kind, process-local store used for tests and
//!   ephemeral setups.

mod config;
mod error;
mod memory;
mod sqlite;

pub use config::{DEFAULT_BUSY_TIMEOUT_MS, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::{SqliteEntity, SqliteStore};

use mpstats_types::{NamedEntity, RepositoryId};

/// Durable storage for one entity kind.
///
/// Every name argument is matched case-insensitively (through
/// [`fold_name`](mpstats_types::fold_name)). Calls run to completion or fail;
/// deadlines, if any, are the implementation's business.
pub trait EntityStore<T: NamedEntity>: Send + Sync {
    /// Inserts a new row and returns the id the store generated for it.
    ///
    /// Fails with [`StoreError::UniqueViolation`] if the folded name is
    /// already taken.
    fn insert(&self, attributes: &T::Attributes) -> StoreResult<RepositoryId>;

    /// Looks a row up by name.
    fn find_by_name(&self, name: &str) -> StoreResult<Option<T>>;

    /// Looks a row up by id.
    fn find_by_id(&self, id: RepositoryId) -> StoreResult<Option<T>>;

    /// Returns every row of this kind.
    fn list_all(&self) -> StoreResult<Vec<T>>;

    /// Deletes the row with this name. Deleting a missing name is not an error.
    fn delete_by_name(&self, name: &str) -> StoreResult<()>;
}
