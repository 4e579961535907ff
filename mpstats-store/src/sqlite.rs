//! SQLite-backed entity store.
//!
//! All entity kinds share one connection; each kind lives in its own table.
//! Tables carry the display name plus a `name_key` column holding the folded
//! name under a `UNIQUE` constraint, so two processes sharing the file still
//! cannot register the same logical name twice.

use crate::{EntityStore, StoreConfig, StoreError, StoreResult};
use mpstats_types::{
    BedrockPlayer, Category, EntityAttributes, Game, JavaPlayer, NamedEntity, RepositoryId,
    fold_name,
};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, ffi, params};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_name TEXT NOT NULL,
        name_key TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS games (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        website_name TEXT NOT NULL,
        game_name TEXT NOT NULL,
        clean_name TEXT NOT NULL,
        name_key TEXT NOT NULL UNIQUE,
        category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE RESTRICT
    );

    CREATE TABLE IF NOT EXISTS bedrock_players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        player_name TEXT NOT NULL,
        name_key TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS java_players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        player_uuid TEXT NOT NULL UNIQUE,
        player_name TEXT NOT NULL,
        name_key TEXT NOT NULL UNIQUE
    );
";

/// Mapping of a record kind onto its SQLite table.
pub trait SqliteEntity: NamedEntity {
    /// Table the rows live in.
    const TABLE: &'static str;

    /// `SELECT` producing the columns [`from_row`](Self::from_row) reads, with
    /// the kind's table aliased as `t`. Callers append `WHERE`/`ORDER BY`.
    const SELECT: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Inserts the row. Returns the number of rows written, which is 0 when a
    /// referenced row is missing.
    fn insert_row(conn: &Connection, attributes: &Self::Attributes) -> rusqlite::Result<usize>;

    /// Error to report when [`insert_row`](Self::insert_row) wrote nothing.
    fn missing_reference(attributes: &Self::Attributes) -> StoreError {
        StoreError::Storage(format!(
            "insert of {} {:?} wrote no row",
            Self::KIND,
            attributes.name()
        ))
    }
}

impl SqliteEntity for Category {
    const TABLE: &'static str = "categories";
    const SELECT: &'static str = "SELECT t.id, t.category_name FROM categories t";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Category {
            repository_id: RepositoryId::new(row.get(0)?),
            category_name: row.get(1)?,
        })
    }

    fn insert_row(conn: &Connection, attributes: &Self::Attributes) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO categories (category_name, name_key) VALUES (?1, ?2)",
            params![attributes.category_name, attributes.name_key()],
        )
    }
}

impl SqliteEntity for Game {
    const TABLE: &'static str = "games";
    const SELECT: &'static str = "SELECT t.id, t.website_name, t.game_name, t.clean_name, c.category_name \
         FROM games t JOIN categories c ON c.id = t.category_id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Game {
            repository_id: RepositoryId::new(row.get(0)?),
            website_name: row.get(1)?,
            game_name: row.get(2)?,
            clean_name: row.get(3)?,
            category_name: row.get(4)?,
        })
    }

    fn insert_row(conn: &Connection, attributes: &Self::Attributes) -> rusqlite::Result<usize> {
        // Resolves the category inside the statement; no category row, no game row.
        conn.execute(
            "INSERT INTO games (website_name, game_name, clean_name, name_key, category_id)
             SELECT ?1, ?2, ?3, ?4, id FROM categories WHERE name_key = ?5",
            params![
                attributes.website_name,
                attributes.game_name,
                attributes.clean_name,
                attributes.name_key(),
                fold_name(&attributes.category_name),
            ],
        )
    }

    fn missing_reference(attributes: &Self::Attributes) -> StoreError {
        StoreError::MissingReference {
            kind: Category::KIND,
            name: attributes.category_name.clone(),
        }
    }
}

impl SqliteEntity for BedrockPlayer {
    const TABLE: &'static str = "bedrock_players";
    const SELECT: &'static str = "SELECT t.id, t.player_name FROM bedrock_players t";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(BedrockPlayer {
            repository_id: RepositoryId::new(row.get(0)?),
            player_name: row.get(1)?,
        })
    }

    fn insert_row(conn: &Connection, attributes: &Self::Attributes) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO bedrock_players (player_name, name_key) VALUES (?1, ?2)",
            params![attributes.player_name, attributes.name_key()],
        )
    }
}

impl SqliteEntity for JavaPlayer {
    const TABLE: &'static str = "java_players";
    const SELECT: &'static str = "SELECT t.id, t.player_uuid, t.player_name FROM java_players t";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let raw_uuid: String = row.get(1)?;
        let player_uuid = Uuid::parse_str(&raw_uuid)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
        Ok(JavaPlayer {
            repository_id: RepositoryId::new(row.get(0)?),
            player_uuid,
            player_name: row.get(2)?,
        })
    }

    fn insert_row(conn: &Connection, attributes: &Self::Attributes) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO java_players (player_uuid, player_name, name_key) VALUES (?1, ?2, ?3)",
            params![
                attributes.player_uuid.to_string(),
                attributes.player_name,
                attributes.name_key(),
            ],
        )
    }
}

/// Persistent store for every entity kind, backed by SQLite.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::open_with_config(&StoreConfig::at_path(path))
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open_with_config(&StoreConfig::default())
    }

    /// Opens a store as described by `config`.
    pub fn open_with_config(config: &StoreConfig) -> StoreResult<Self> {
        let conn = match &config.path {
            Some(path) => Connection::open(path)?,
            None => Connection::open_in_memory()?,
        };
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        debug!(
            "Opened SQLite store at {}",
            config
                .path
                .as_deref()
                .map_or_else(|| ":memory:".to_string(), |p| p.display().to_string())
        );
        Self::open_with_conn(Arc::new(Mutex::new(conn)))
    }

    /// Wraps an existing shared connection, creating the schema if needed.
    pub fn open_with_conn(conn: Arc<Mutex<Connection>>) -> StoreResult<Self> {
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        self.lock()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Storage(format!("connection lock poisoned: {e}")))
    }

    /// Number of rows stored for kind `T`.
    pub fn count<T: SqliteEntity>(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", T::TABLE),
            [],
            |row| row.get(0),
        )?;
        usize::try_from(count)
            .map_err(|e| StoreError::Storage(format!("invalid row count {count}: {e}")))
    }

    fn query<T: SqliteEntity>(
        &self,
        clause: &str,
        param: &dyn rusqlite::ToSql,
    ) -> StoreResult<Option<T>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{} {clause}", T::SELECT))?;
        let mut rows = stmt.query_map([param], T::from_row)?;
        Ok(rows.next().transpose()?)
    }
}

/// Maps integrity failures onto the store's error variants; everything else
/// stays a plain database error.
fn classify(err: rusqlite::Error, kind: &'static str, name: &str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return StoreError::UniqueViolation {
                    kind,
                    name: name.to_string(),
                };
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return StoreError::Constraint(format!("{kind} {name:?} is still referenced"));
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

impl<T: SqliteEntity> EntityStore<T> for SqliteStore {
    fn insert(&self, attributes: &T::Attributes) -> StoreResult<RepositoryId> {
        let conn = self.lock()?;
        let written = T::insert_row(&conn, attributes)
            .map_err(|e| classify(e, T::KIND, attributes.name()))?;
        if written == 0 {
            return Err(T::missing_reference(attributes));
        }
        Ok(RepositoryId::new(conn.last_insert_rowid()))
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<T>> {
        self.query("WHERE t.name_key = ?1", &fold_name(name))
    }

    fn find_by_id(&self, id: RepositoryId) -> StoreResult<Option<T>> {
        self.query("WHERE t.id = ?1", &id.get())
    }

    fn list_all(&self) -> StoreResult<Vec<T>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY t.id", T::SELECT))?;
        let rows = stmt.query_map([], T::from_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            &format!("DELETE FROM {} WHERE name_key = ?1", T::TABLE),
            params![fold_name(name)],
        )
        .map_err(|e| classify(e, T::KIND, name))?;
        Ok(())
    }
}
