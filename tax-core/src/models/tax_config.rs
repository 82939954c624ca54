use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::deduction_limits::{DEFAULT_MAX_K_RECEIPT_DEDUCTION, DEFAULT_PERSONAL_DEDUCTION};

/// Keys held by the tax configuration store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigKey {
    #[serde(rename = "PERSONAL_DEDUCTION")]
    PersonalDeduction,
    #[serde(rename = "MAX_K_RECEIPT_DEDUCTION")]
    MaxKReceiptDeduction,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [Self::PersonalDeduction, Self::MaxKReceiptDeduction];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalDeduction => "PERSONAL_DEDUCTION",
            Self::MaxKReceiptDeduction => "MAX_K_RECEIPT_DEDUCTION",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PERSONAL_DEDUCTION" => Some(Self::PersonalDeduction),
            "MAX_K_RECEIPT_DEDUCTION" => Some(Self::MaxKReceiptDeduction),
            _ => None,
        }
    }

    /// Inclusive range an administrator may set this key to.
    pub fn valid_range(&self) -> (Decimal, Decimal) {
        match self {
            Self::PersonalDeduction => (dec!(10000), dec!(100000)),
            Self::MaxKReceiptDeduction => (dec!(1), dec!(100000)),
        }
    }

    /// Value used when the store has no entry for this key.
    pub fn default_value(&self) -> Decimal {
        match self {
            Self::PersonalDeduction => DEFAULT_PERSONAL_DEDUCTION,
            Self::MaxKReceiptDeduction => DEFAULT_MAX_K_RECEIPT_DEDUCTION,
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub key: ConfigKey,
    pub name: String,
    pub value: Decimal,
    pub updated_at: DateTime<Utc>,
}
