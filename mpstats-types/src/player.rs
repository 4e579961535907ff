//! Player records for the supported game families.
//!
//! Bedrock players are identified by name alone. Java players additionally
//! carry their account UUID.

use crate::{EntityAttributes, NamedEntity, RepositoryId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A player of some game family.
///
/// Filters, leaderboard entries and the player service are generic over this
/// trait so each family can supply its own player representation.
pub trait Player: NamedEntity {
    fn player_name(&self) -> &str {
        self.name()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedrockPlayer {
    pub repository_id: RepositoryId,
    pub player_name: String,
}

impl PartialEq for BedrockPlayer {
    fn eq(&self, other: &Self) -> bool {
        self.repository_id == other.repository_id
    }
}

impl Eq for BedrockPlayer {}

impl Hash for BedrockPlayer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repository_id.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBedrockPlayer {
    pub player_name: String,
}

impl NewBedrockPlayer {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
        }
    }
}

impl EntityAttributes for NewBedrockPlayer {
    fn name(&self) -> &str {
        &self.player_name
    }
}

impl NamedEntity for BedrockPlayer {
    type Attributes = NewBedrockPlayer;
    const KIND: &'static str = "bedrock player";

    fn repository_id(&self) -> RepositoryId {
        self.repository_id
    }

    fn name(&self) -> &str {
        &self.player_name
    }

    fn from_attributes(id: RepositoryId, attributes: NewBedrockPlayer) -> Self {
        Self {
            repository_id: id,
            player_name: attributes.player_name,
        }
    }
}

impl Player for BedrockPlayer {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaPlayer {
    pub repository_id: RepositoryId,
    pub player_uuid: Uuid,
    pub player_name: String,
}

impl PartialEq for JavaPlayer {
    fn eq(&self, other: &Self) -> bool {
        self.repository_id == other.repository_id
    }
}

impl Eq for JavaPlayer {}

impl Hash for JavaPlayer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repository_id.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJavaPlayer {
    pub player_uuid: Uuid,
    pub player_name: String,
}

impl NewJavaPlayer {
    pub fn new(player_uuid: Uuid, player_name: impl Into<String>) -> Self {
        Self {
            player_uuid,
            player_name: player_name.into(),
        }
    }
}

impl EntityAttributes for NewJavaPlayer {
    fn name(&self) -> &str {
        &self.player_name
    }
}

impl NamedEntity for JavaPlayer {
    type Attributes = NewJavaPlayer;
    const KIND: &'static str = "java player";

    fn repository_id(&self) -> RepositoryId {
        self.repository_id
    }

    fn name(&self) -> &str {
        &self.player_name
    }

    fn from_attributes(id: RepositoryId, attributes: NewJavaPlayer) -> Self {
        Self {
            repository_id: id,
            player_uuid: attributes.player_uuid,
            player_name: attributes.player_name,
        }
    }
}

impl Player for JavaPlayer {}
