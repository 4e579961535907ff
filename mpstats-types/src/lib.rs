//! Core record types for the mpstats entity registry.
//!
//! This crate defines the storage-agnostic vocabulary shared by the store,
//! registry and front-end crates:
//! - [`RepositoryId`] store-assigned identifiers
//! - [`fold_name`] the one case-folding rule every index agrees on
//! - [`NamedEntity`] / [`EntityAttributes`] the capability traits a record
//!   needs to be managed by a registry
//! - Record shapes: games, categories, players, leaderboards, ranked entries
//!   and filters
//!
//! Nothing here performs I/O.

mod entity;
mod filter;
mod game;
mod ids;
mod leaderboard;
mod player;

pub use entity::{EntityAttributes, NamedEntity, fold_name};
pub use filter::{Filter, Reason};
pub use game::{Category, Game, NewCategory, NewGame};
pub use ids::RepositoryId;
pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardEntryPosition, rank};
pub use player::{BedrockPlayer, JavaPlayer, NewBedrockPlayer, NewJavaPlayer, Player};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid repository id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
