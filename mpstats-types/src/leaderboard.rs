//! Leaderboards and (optionally ranked) leaderboard entries.

use crate::{Game, RepositoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stat board of a game, e.g. "wins" on the "all time" board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub repository_id: RepositoryId,
    pub game: Game,
    pub stat: String,
    pub board: String,
    pub deprecated: bool,
    pub last_update: DateTime<Utc>,
}

/// A player's score on some leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry<P> {
    pub player: P,
    pub score: i64,
}

impl<P> LeaderboardEntry<P> {
    pub fn new(player: P, score: i64) -> Self {
        Self { player, score }
    }
}

/// A [`LeaderboardEntry`] decorated with its 1-based rank.
///
/// The position is never stored; it only exists on materialized ranked views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntryPosition<P> {
    #[serde(flatten)]
    pub entry: LeaderboardEntry<P>,
    pub position: u32,
}

impl<P> LeaderboardEntryPosition<P> {
    pub fn new(player: P, score: i64, position: u32) -> Self {
        Self {
            entry: LeaderboardEntry::new(player, score),
            position,
        }
    }

    pub fn player(&self) -> &P {
        &self.entry.player
    }

    pub fn score(&self) -> i64 {
        self.entry.score
    }
}

/// Attaches positions to an already ordered sequence of entries.
///
/// The first entry gets position 1. Ordering (and tie handling) is the
/// producer's business; this only numbers what it is given.
pub fn rank<P, I>(entries: I) -> impl Iterator<Item = LeaderboardEntryPosition<P>>
where
    I: IntoIterator<Item = LeaderboardEntry<P>>,
{
    (1u32..)
        .zip(entries)
        .map(|(position, entry)| LeaderboardEntryPosition { entry, position })
}
