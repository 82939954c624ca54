use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fixed cap on the donation deduction.
pub const MAX_DONATION_DEDUCTION: Decimal = dec!(100000);

/// Personal deduction used when the config store cannot supply one.
pub const DEFAULT_PERSONAL_DEDUCTION: Decimal = dec!(60000);

/// K-receipt cap used when the config store cannot supply one.
pub const DEFAULT_MAX_K_RECEIPT_DEDUCTION: Decimal = dec!(50000);

/// Snapshot of the deduction limits in force for a single computation.
///
/// Resolved once per request by the caller (usually from the config store)
/// and passed to the engine by reference. The engine never re-reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLimits {
    pub personal_deduction: Decimal,
    pub max_k_receipt_deduction: Decimal,
    pub max_donation_deduction: Decimal,
}

impl DeductionLimits {
    /// Builds limits from the two configurable values; the donation cap is
    /// always [`MAX_DONATION_DEDUCTION`].
    pub fn new(
        personal_deduction: Decimal,
        max_k_receipt_deduction: Decimal,
    ) -> Self {
        Self {
            personal_deduction,
            max_k_receipt_deduction,
            max_donation_deduction: MAX_DONATION_DEDUCTION,
        }
    }
}

impl Default for DeductionLimits {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONAL_DEDUCTION, DEFAULT_MAX_K_RECEIPT_DEDUCTION)
    }
}
