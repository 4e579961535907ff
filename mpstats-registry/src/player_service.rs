//! Player lookup for one game family.

use crate::error::RegistryResult;
use crate::registry::Registry;
use mpstats_store::EntityStore;
use mpstats_types::{Player, RepositoryId};
use std::sync::Arc;

/// Registry of the players of one game family (Bedrock, Java, ...).
pub struct PlayerService<P: Player> {
    players: Registry<P>,
}

impl<P: Player> PlayerService<P> {
    pub fn new(store: Arc<dyn EntityStore<P>>) -> RegistryResult<Self> {
        Ok(Self {
            players: Registry::new(store)?,
        })
    }

    pub fn has_player(&self, player_name: &str) -> bool {
        self.players.has(player_name)
    }

    pub fn get_player(&self, player_name: &str) -> Option<P> {
        self.players.get(player_name)
    }

    pub fn get_player_by_id(&self, repository_id: RepositoryId) -> Option<P> {
        self.players.get_by_id(repository_id)
    }

    pub fn get_or_create_player(&self, attributes: P::Attributes) -> RegistryResult<P> {
        self.players.get_or_create(attributes)
    }

    pub fn delete_player(&self, player_name: &str) -> RegistryResult<()> {
        self.players.delete(player_name)
    }

    pub fn get_players(&self) -> Vec<P> {
        self.players.list()
    }
}
