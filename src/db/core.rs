use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::path::Path;
use tokio::time::Duration;
use tracing::{debug, info, instrument};

use crate::TARGET_DB;

/// Read-only handle on a legacy snapshot.
#[derive(Clone)]
pub struct LegacyDatabase {
    pool: Pool<Sqlite>,
}

impl LegacyDatabase {
    /// Get access to the database pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Wrap an existing pool, e.g. an in-memory database in tests.
    pub fn from_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    #[instrument(target = "db", level = "info")]
    pub async fn open(database_path: &str) -> Result<Self, sqlx::Error> {
        info!(target: TARGET_DB, "Opening legacy snapshot: {}", database_path);

        if !Path::new(database_path).is_file() {
            return Err(sqlx::Error::Configuration(
                format!("Legacy database '{}' does not exist", database_path).into(),
            ));
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(database_path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_options)
            .await?;

        info!(target: TARGET_DB, "Legacy snapshot opened");
        Ok(Self { pool })
    }

    pub async fn table_exists(&self, table: &str) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
        )
        .bind(table)
        .fetch_one(self.pool())
        .await?;

        debug!(target: TARGET_DB, "Table '{}' exists: {}", table, count > 0);
        Ok(count > 0)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Quote an identifier taken from schema introspection for interpolation.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
