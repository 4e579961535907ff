//! Games and their categories.

use crate::error::{RegistryError, RegistryResult};
use crate::registry::Registry;
use mpstats_store::EntityStore;
use mpstats_types::{Category, Game, NamedEntity, NewCategory, NewGame, fold_name};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Game and category registries, plus the rule tying them together: a game
/// always names a category that exists.
pub struct GameService {
    games: Registry<Game>,
    categories: Registry<Category>,
    // Held across "resolve category, insert game" and "check references,
    // delete category" so neither can interleave with the other.
    links: Mutex<()>,
}

impl GameService {
    /// Builds both registries, hydrating each from its store.
    pub fn new(
        game_store: Arc<dyn EntityStore<Game>>,
        category_store: Arc<dyn EntityStore<Category>>,
    ) -> RegistryResult<Self> {
        // Categories first so a failing game load does not hide a category error.
        let categories = Registry::new(category_store)?;
        let games = Registry::new(game_store)?;
        Ok(Self {
            games,
            categories,
            links: Mutex::new(()),
        })
    }

    /// Builds the service over one store that holds both kinds.
    pub fn with_store<S>(store: Arc<S>) -> RegistryResult<Self>
    where
        S: EntityStore<Game> + EntityStore<Category> + 'static,
    {
        let game_store: Arc<dyn EntityStore<Game>> = store.clone();
        let category_store: Arc<dyn EntityStore<Category>> = store;
        Self::new(game_store, category_store)
    }

    fn lock_links(&self) -> MutexGuard<'_, ()> {
        self.links.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Games ────────────────────────────────────────────────────

    pub fn has_game(&self, game_name: &str) -> bool {
        self.games.has(game_name)
    }

    pub fn get_game(&self, game_name: &str) -> Option<Game> {
        self.games.get(game_name)
    }

    pub fn get_games(&self) -> Vec<Game> {
        self.games.list()
    }

    /// Returns the game called `game_name`, creating it (and its category, if
    /// needed) when it does not exist yet.
    ///
    /// The category is resolved first. If that fails nothing else happens. If
    /// the game insert then fails, the category stays; retrying the call
    /// reuses it. A concurrent [`delete_category`](Self::delete_category)
    /// waits until the game is in place, and then sees it as a reference.
    pub fn get_or_create_game(
        &self,
        website_name: &str,
        game_name: &str,
        clean_name: &str,
        category_name: &str,
    ) -> RegistryResult<Game> {
        let _links = self.lock_links();
        let category = self
            .categories
            .get_or_create(NewCategory::new(category_name))
            .map_err(|e| RegistryError::ReferentialViolation {
                game: game_name.to_string(),
                category: category_name.to_string(),
                source: Box::new(e),
            })?;

        self.games.get_or_create(NewGame::new(
            website_name,
            game_name,
            clean_name,
            category.category_name,
        ))
    }

    pub fn delete_game(&self, game_name: &str) -> RegistryResult<()> {
        self.games.delete(game_name)
    }

    // ── Categories ───────────────────────────────────────────────

    pub fn has_category(&self, category_name: &str) -> bool {
        self.categories.has(category_name)
    }

    pub fn get_category(&self, category_name: &str) -> Option<Category> {
        self.categories.get(category_name)
    }

    pub fn get_categories(&self) -> Vec<Category> {
        self.categories.list()
    }

    pub fn get_category_or_create(&self, category_name: &str) -> RegistryResult<Category> {
        self.categories.get_or_create(NewCategory::new(category_name))
    }

    /// Deletes a category that no game refers to anymore.
    pub fn delete_category(&self, category_name: &str) -> RegistryResult<()> {
        let _links = self.lock_links();
        let key = fold_name(category_name);
        let references = self
            .games
            .list()
            .iter()
            .filter(|game| fold_name(&game.category_name) == key)
            .count();
        if references > 0 {
            debug!(
                "Refusing to delete category {:?}: {} game(s) still use it",
                category_name, references
            );
            return Err(RegistryError::InUse {
                kind: Category::KIND,
                name: category_name.to_string(),
                references,
            });
        }
        self.categories.delete(category_name)
    }

    /// The underlying game registry.
    pub fn games(&self) -> &Registry<Game> {
        &self.games
    }

    /// The underlying category registry.
    pub fn categories(&self) -> &Registry<Category> {
        &self.categories
    }
}
