//! SQLite implementations of the repository ports.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::ports::{ClockPort, RepoError};

mod catalog_repo;
mod game_repo;
mod user_repo;

pub use catalog_repo::SqliteCatalogRepo;
pub use game_repo::SqliteGameRepo;
pub use user_repo::SqliteUserRepo;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS themes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        image_url TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        theme_id INTEGER NOT NULL REFERENCES themes(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        image_url TEXT NOT NULL,
        points INTEGER NOT NULL DEFAULT 10,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS forbidden_words (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        character_id INTEGER NOT NULL REFERENCES characters(id) ON DELETE CASCADE,
        word TEXT NOT NULL,
        UNIQUE (character_id, word)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        score INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS games (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        theme_id INTEGER NOT NULL REFERENCES themes(id) ON DELETE CASCADE,
        status TEXT NOT NULL DEFAULT 'active',
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS game_characters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
        character_id INTEGER NOT NULL REFERENCES characters(id) ON DELETE CASCADE,
        guessed INTEGER NOT NULL DEFAULT 0,
        UNIQUE (game_id, character_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_characters_theme ON characters(theme_id)",
    "CREATE INDEX IF NOT EXISTS idx_games_user ON games(user_id)",
];

/// Open a pool for `database_url` (`sqlite:path.db` or `sqlite::memory:`),
/// creating the file when missing. Foreign keys are enforced on every
/// connection.
pub async fn connect(database_url: &str) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| RepoError::database("connect", e))?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(5);
    // Each in-memory connection is its own database; keep exactly one alive.
    if database_url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }

    pool_options
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create tables and indexes if they do not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }
    Ok(())
}

/// Map a failed write, turning unique and foreign-key violations into
/// `ConstraintViolation` so callers can answer with a conflict.
pub(crate) fn map_write_error(operation: &'static str, error: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() || db.is_foreign_key_violation() {
            return RepoError::constraint(db.message());
        }
    }
    RepoError::database(operation, error)
}

pub(crate) fn to_u32(value: i64, column: &str) -> Result<u32, RepoError> {
    u32::try_from(value)
        .map_err(|_| RepoError::serialization(format!("{} out of range: {}", column, value)))
}

/// Create all SQLite repositories from a pool.
pub struct SqliteRepositories {
    pub catalog: Arc<SqliteCatalogRepo>,
    pub user: Arc<SqliteUserRepo>,
    pub game: Arc<SqliteGameRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            catalog: Arc::new(SqliteCatalogRepo::new(pool.clone(), clock.clone())),
            user: Arc::new(SqliteUserRepo::new(pool.clone(), clock.clone())),
            game: Arc::new(SqliteGameRepo::new(pool, clock)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let pool = connect("sqlite::memory:").await.expect("connect");
        ensure_schema(&pool).await.expect("first run");
        ensure_schema(&pool).await.expect("second run");
    }

    #[tokio::test]
    async fn connect_creates_database_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("charades.db");
        let url = format!("sqlite:{}", path.display());

        let pool = connect(&url).await.expect("connect");
        ensure_schema(&pool).await.expect("schema");

        assert!(path.exists());
    }
}
