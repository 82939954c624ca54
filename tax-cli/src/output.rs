//! Wire shapes printed by `tax-calc`.
//!
//! Amounts are emitted as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::{ConfigKey, TaxComputationResult, TaxConfig};
use tax_data::{TaxLevel, tax_levels};

/// `{"tax", "taxRefund", "taxLevel": [{"level", "tax"}]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_refund: Decimal,
    pub tax_level: Vec<TaxLevel>,
}

impl From<&TaxComputationResult> for TaxResponse {
    fn from(result: &TaxComputationResult) -> Self {
        Self {
            tax: result.total_tax_due,
            tax_refund: result.refund,
            tax_level: tax_levels(result),
        }
    }
}

/// One row of `config show`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    pub key: ConfigKey,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl From<TaxConfig> for ConfigEntry {
    fn from(config: TaxConfig) -> Self {
        Self {
            key: config.key,
            name: config.name,
            value: config.value,
            updated_at: config.updated_at,
        }
    }
}

/// Result of `config set`: `{"personalDeduction": n}` or `{"kReceipt": n}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitUpdate {
    PersonalDeduction(#[serde(with = "rust_decimal::serde::float")] Decimal),
    KReceipt(#[serde(with = "rust_decimal::serde::float")] Decimal),
}

impl From<&TaxConfig> for LimitUpdate {
    fn from(config: &TaxConfig) -> Self {
        match config.key {
            ConfigKey::PersonalDeduction => Self::PersonalDeduction(config.value),
            ConfigKey::MaxKReceiptDeduction => Self::KReceipt(config.value),
        }
    }
}
