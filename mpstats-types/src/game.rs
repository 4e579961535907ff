//! Game and category records.

use crate::{EntityAttributes, NamedEntity, RepositoryId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A grouping of games. Referenced by name from [`Game`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub repository_id: RepositoryId,
    pub category_name: String,
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.repository_id == other.repository_id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repository_id.hash(state);
    }
}

/// Attributes for a category that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub category_name: String,
}

impl NewCategory {
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
        }
    }
}

impl EntityAttributes for NewCategory {
    fn name(&self) -> &str {
        &self.category_name
    }
}

impl NamedEntity for Category {
    type Attributes = NewCategory;
    const KIND: &'static str = "category";

    fn repository_id(&self) -> RepositoryId {
        self.repository_id
    }

    fn name(&self) -> &str {
        &self.category_name
    }

    fn from_attributes(id: RepositoryId, attributes: NewCategory) -> Self {
        Self {
            repository_id: id,
            category_name: attributes.category_name,
        }
    }
}

/// A game known to the statistics API.
///
/// `game_name` is the unique lookup name; `category_name` always names a
/// category that existed when the game was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub repository_id: RepositoryId,
    pub website_name: String,
    pub game_name: String,
    pub clean_name: String,
    pub category_name: String,
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.repository_id == other.repository_id
    }
}

impl Eq for Game {}

impl Hash for Game {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repository_id.hash(state);
    }
}

/// Attributes for a game that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub website_name: String,
    pub game_name: String,
    pub clean_name: String,
    pub category_name: String,
}

impl NewGame {
    pub fn new(
        website_name: impl Into<String>,
        game_name: impl Into<String>,
        clean_name: impl Into<String>,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            website_name: website_name.into(),
            game_name: game_name.into(),
            clean_name: clean_name.into(),
            category_name: category_name.into(),
        }
    }
}

impl EntityAttributes for NewGame {
    fn name(&self) -> &str {
        &self.game_name
    }
}

impl NamedEntity for Game {
    type Attributes = NewGame;
    const KIND: &'static str = "game";

    fn repository_id(&self) -> RepositoryId {
        self.repository_id
    }

    fn name(&self) -> &str {
        &self.game_name
    }

    fn from_attributes(id: RepositoryId, attributes: NewGame) -> Self {
        Self {
            repository_id: id,
            website_name: attributes.website_name,
            game_name: attributes.game_name,
            clean_name: attributes.clean_name,
            category_name: attributes.category_name,
        }
    }
}
