//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Storage-level failure that is not a plain database error
    /// (poisoned connection, unreadable row).
    #[error("storage error: {0}")]
    Storage(String),

    /// A row whose folded name collides with the new one already exists.
    #[error("{kind} named {name:?} already exists")]
    UniqueViolation { kind: &'static str, name: String },

    /// A row referenced by the new one does not exist.
    #[error("referenced {kind} {name:?} does not exist")]
    MissingReference { kind: &'static str, name: String },

    /// Any other integrity constraint, e.g. deleting a referenced row.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Configuration could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True for failures caused by a duplicate name, typically a create that
    /// raced with another writer on the same store.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }
}
