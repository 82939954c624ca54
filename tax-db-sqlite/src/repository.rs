use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tax_core::{ConfigKey, RepositoryError, TaxConfig, TaxConfigRepository};
use tracing::debug;

use crate::decimal::{decimal_to_text, get_decimal};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens `database_url`, creating the file if it does not exist.
    ///
    /// Accepts bare paths (`tax_config.db`), sqlx URLs (`sqlite:...`) and
    /// `:memory:`. An in-memory database is held on a single connection that
    /// is never recycled, so its contents live as long as the repository.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {}", database_url))?
            .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    /// Opens `database_url`, brings the schema up to date and inserts any
    /// default limits that are not stored yet.
    pub async fn open(
        database_url: &str,
        seeds_dir: &Path,
    ) -> Result<Self> {
        let repo = Self::new(database_url).await?;
        repo.run_migrations().await?;
        repo.run_seeds(seeds_dir).await?;
        Ok(repo)
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to execute seed file '{}'", path.display()))?;
            debug!(file = %path.display(), "applied seed file");
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_tax_config(row: &SqliteRow) -> Result<TaxConfig, RepositoryError> {
    let key_str: String = row
        .try_get("key")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let key = ConfigKey::parse(&key_str)
        .ok_or_else(|| RepositoryError::Database(format!("Invalid config key: {}", key_str)))?;

    Ok(TaxConfig {
        key,
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        value: get_decimal(row, "value")?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get updated_at: {}", e)))?,
    })
}

#[async_trait]
impl TaxConfigRepository for SqliteRepository {
    async fn get_tax_config(
        &self,
        key: ConfigKey,
    ) -> Result<TaxConfig, RepositoryError> {
        let row = sqlx::query("SELECT key, name, value, updated_at FROM tax_config WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_tax_config(&row)
    }

    async fn set_tax_config(
        &self,
        key: ConfigKey,
        value: Decimal,
    ) -> Result<TaxConfig, RepositoryError> {
        let row = sqlx::query(
            "UPDATE tax_config SET value = ?, updated_at = ?
             WHERE key = ?
             RETURNING key, name, value, updated_at",
        )
        .bind(decimal_to_text(value))
        .bind(Utc::now())
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_tax_config(&row)
    }

    async fn list_tax_configs(&self) -> Result<Vec<TaxConfig>, RepositoryError> {
        let rows = sqlx::query("SELECT key, name, value, updated_at FROM tax_config ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_tax_config).collect()
    }
}
