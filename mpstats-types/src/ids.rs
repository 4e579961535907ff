//! Identifier types assigned by the persistent store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored row.
///
/// Only a store hands these out. An id is assigned once, at creation time,
/// and is never reused for another record of the same kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(i64);

impl RepositoryId {
    /// Wraps a raw store id.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw value as the store knows it.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Parses an id from its decimal representation.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RepositoryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for RepositoryId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}
