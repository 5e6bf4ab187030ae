//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::debug;

use super::bookmark::SqliteBookmarkRepository;
use crate::db::{Database, DbError, DbResult};

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (or create) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        debug!(path = %path.as_ref().display(), "Opened SQLite database");
        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every connection to `:memory:` is a separate database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Direct pool access for tests and maintenance queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Bookmarks<'a> = SqliteBookmarkRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::migrate!("./data/sql/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;

        debug!("Applied SQLite migrations");
        Ok(())
    }

    fn bookmarks(&self) -> Self::Bookmarks<'_> {
        SqliteBookmarkRepository { pool: &self.pool }
    }
}
