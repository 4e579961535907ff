//! Error types for the registry layer.

use mpstats_store::StoreError;
use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur in registry operations.
///
/// Plain lookups never fail: an unknown name is reported as `None`/`false`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The backing store rejected a read or write. The in-memory index was
    /// left untouched.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A caller required a record that does not exist.
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// A game could not be created because its category could not be.
    #[error("cannot create game {game:?}: category {category:?} unavailable")]
    ReferentialViolation {
        game: String,
        category: String,
        #[source]
        source: Box<RegistryError>,
    },

    /// A record is still referenced by others and cannot be deleted.
    #[error("{kind} {name:?} is still referenced by {references} record(s)")]
    InUse {
        kind: &'static str,
        name: String,
        references: usize,
    },
}
