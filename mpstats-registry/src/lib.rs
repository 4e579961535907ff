//! Cached, case-insensitive get-or-create registries for mpstats entities.
//!
//! # Architecture
//!
//! - [`NameIndex`]: folded name -> record map, plus an id lookup
//! - [`Registry`]: one per entity kind; owns a `NameIndex`, writes through to
//!   an [`EntityStore`](mpstats_store::EntityStore) and serializes creates so
//!   no name is ever inserted twice
//! - [`GameService`]: game and category registries with the rule that a game
//!   always references an existing category
//! - [`PlayerService`]: player registry for one game family
//!
//! Registries are plain values: build one per entity kind at startup and
//! share it (typically behind an `Arc`) with whatever serves requests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mpstats_registry::GameService;
//! use mpstats_store::SqliteStore;
//!
//! let store = Arc::new(SqliteStore::open_in_memory().unwrap());
//! let games = GameService::with_store(store).unwrap();
//!
//! let game = games.get_or_create_game("W1", "GAME1", "C1", "CATEGORY1").unwrap();
//! assert!(games.has_game("game1"));
//! assert_eq!(game.category_name, "CATEGORY1");
//! ```

mod error;
mod game_service;
mod index;
mod player_service;
mod registry;

pub use error::{RegistryError, RegistryResult};
pub use game_service::GameService;
pub use index::NameIndex;
pub use player_service::PlayerService;
pub use registry::Registry;
