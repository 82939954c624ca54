//! Selection of the config store backend by name.

use async_trait::async_trait;
use tracing::debug;

use super::limits::load_deduction_limits;
use super::repository::{RepositoryError, TaxConfigRepository};
use crate::models::DeductionLimits;

/// Where the config store lives.
///
/// `connection_string` is handed to the backend untouched: a file path or
/// `:memory:` for `sqlite`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl DbConfig {
    pub fn new(
        backend: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            backend: backend.into(),
            connection_string: connection_string.into(),
        }
    }

    /// A throwaway SQLite store holding only the seeded defaults.
    pub fn in_memory() -> Self {
        Self::new("sqlite", ":memory:")
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Opens a migrated, seeded config store for one backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn create(&self, config: &DbConfig) -> Result<Box<dyn TaxConfigRepository>, RepositoryError>;
}

/// The config store backends a binary was built with.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: Vec<Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`, replacing any earlier one with the same backend name.
    pub fn register(&mut self, factory: Box<dyn RepositoryFactory>) {
        self.factories
            .retain(|f| f.backend_name() != factory.backend_name());
        self.factories.push(factory);
    }

    pub fn with_backend(mut self, factory: impl RepositoryFactory + 'static) -> Self {
        self.register(Box::new(factory));
        self
    }

    /// Backend names in registration order.
    pub fn backends(&self) -> Vec<&'static str> {
        self.factories.iter().map(|f| f.backend_name()).collect()
    }

    /// Opens the store named by `config.backend`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Configuration`] for an unknown backend; otherwise
    /// whatever the backend reports while opening.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn TaxConfigRepository>, RepositoryError> {
        let Some(factory) = self
            .factories
            .iter()
            .find(|f| f.backend_name() == config.backend)
        else {
            return Err(RepositoryError::Configuration(format!(
                "no config store backend named '{}' (known: {})",
                config.backend,
                self.backends().join(", ")
            )));
        };

        debug!(backend = %config.backend, db = %config.connection_string, "opening config store");
        factory.create(config).await
    }

    /// Opens the store and takes one snapshot of the deduction limits.
    ///
    /// Failing to open the store is an error; keys missing from an open
    /// store fall back to their defaults.
    pub async fn open_limits(
        &self,
        config: &DbConfig,
    ) -> Result<DeductionLimits, RepositoryError> {
        let repo = self.create(config).await?;
        Ok(load_deduction_limits(repo.as_ref()).await)
    }
}
