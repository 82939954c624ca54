use std::path::PathBuf;

use async_trait::async_trait;
use tax_core::db::{DbConfig, RepositoryError, RepositoryFactory, TaxConfigRepository};
use tracing::info;

use crate::repository::SqliteRepository;

/// `TAX_DB_SQLITE_SEEDS_DIR`, else `./seeds` if present, else the seeds
/// shipped with this crate.
fn seeds_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TAX_DB_SQLITE_SEEDS_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_seeds = PathBuf::from("./seeds");
    if cwd_seeds.is_dir() {
        return cwd_seeds;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds")
}

/// The `sqlite` config store backend.
///
/// The connection string is a file path, created on first use, or
/// `:memory:`.
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn TaxConfigRepository>, RepositoryError> {
        let seeds = seeds_dir();
        let repo = SqliteRepository::open(&config.connection_string, &seeds)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        info!(db = %config.connection_string, seeds = %seeds.display(), "sqlite config store ready");
        Ok(Box::new(repo))
    }
}
