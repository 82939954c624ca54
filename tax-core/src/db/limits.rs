//! Resolution and administration of the configurable deduction limits.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use super::repository::{RepositoryError, TaxConfigRepository};
use crate::models::{ConfigKey, DeductionLimits, TaxConfig};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeductionLimitError {
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: ConfigKey,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Reads the current limits from `repo`, one snapshot per request.
///
/// Never fails: a key that is missing or unreadable falls back to its
/// default value and is logged at `warn`.
pub async fn load_deduction_limits(repo: &dyn TaxConfigRepository) -> DeductionLimits {
    let personal = resolve(repo, ConfigKey::PersonalDeduction).await;
    let k_receipt = resolve(repo, ConfigKey::MaxKReceiptDeduction).await;
    DeductionLimits::new(personal, k_receipt)
}

async fn resolve(
    repo: &dyn TaxConfigRepository,
    key: ConfigKey,
) -> Decimal {
    match repo.get_tax_config(key).await {
        Ok(config) => config.value,
        Err(e) => {
            let fallback = key.default_value();
            warn!(key = %key, error = %e, fallback = %fallback, "using default deduction limit");
            fallback
        }
    }
}

/// Validates `value` against the key's allowed range, then stores it.
///
/// # Errors
///
/// * [`DeductionLimitError::OutOfRange`] without touching the store.
/// * [`DeductionLimitError::Repository`] if the write fails.
pub async fn update_deduction_limit(
    repo: &dyn TaxConfigRepository,
    key: ConfigKey,
    value: Decimal,
) -> Result<TaxConfig, DeductionLimitError> {
    let (min, max) = key.valid_range();
    if value < min || value > max {
        return Err(DeductionLimitError::OutOfRange {
            key,
            value,
            min,
            max,
        });
    }

    let updated = repo.set_tax_config(key, value).await?;
    info!(key = %key, value = %updated.value, "deduction limit updated");
    Ok(updated)
}
