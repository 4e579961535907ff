//! Player filters: records describing why and when a player's data is
//! excluded from a leaderboard.

use crate::{Leaderboard, RepositoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a filter was put in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    GiantScore,
    Glitched,
    Hacking,
    Other,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reason::GiantScore => "giant_score",
            Reason::Glitched => "glitched",
            Reason::Hacking => "hacking",
            Reason::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// A time-boxed criterion binding a player to a leaderboard.
///
/// Generic over the player representation so Bedrock and Java families share
/// the same shape. The repository id is internal and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter<P> {
    #[serde(skip)]
    pub repository_id: RepositoryId,
    pub player: P,
    pub leaderboard: Leaderboard,
    pub reason: Reason,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl<P> Filter<P> {
    /// Returns true if `instant` lies inside `[start, end]`.
    pub fn covers(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}
