use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{ConfigKey, TaxConfig};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Key/value store for administrator-controlled tax settings.
#[async_trait]
pub trait TaxConfigRepository: Send + Sync {
    async fn get_tax_config(&self, key: ConfigKey) -> Result<TaxConfig, RepositoryError>;

    /// Overwrites the value of an existing key.
    ///
    /// Returns [`RepositoryError::NotFound`] if the key has never been
    /// seeded. No range checks happen here; see
    /// [`update_deduction_limit`](crate::db::limits::update_deduction_limit).
    async fn set_tax_config(
        &self,
        key: ConfigKey,
        value: Decimal,
    ) -> Result<TaxConfig, RepositoryError>;

    async fn list_tax_configs(&self) -> Result<Vec<TaxConfig>, RepositoryError>;
}
