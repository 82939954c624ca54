//! Deduction aggregation.
//!
//! Sums allowance amounts per category and applies each category's cap:
//!
//! | Category | Cap | Effect |
//! |----------|-----|--------|
//! | `donation` | [`DeductionLimits::max_donation_deduction`] | deducted up to the cap |
//! | `k-receipt` | [`DeductionLimits::max_k_receipt_deduction`] | deducted up to the cap |
//! | `e-shopping` | n/a | accepted, no deduction |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::cap;
use crate::calculations::error::ValidationError;
use crate::{Allowance, AllowanceCategory, DeductionLimits};

/// Capped deductions derived from a set of allowances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeductionSummary {
    pub donation: Decimal,
    pub k_receipt: Decimal,
    pub total: Decimal,
}

/// Rejects the first allowance with a negative amount.
pub fn validate_allowances(allowances: &[Allowance]) -> Result<(), ValidationError> {
    match allowances.iter().find(|a| a.amount < Decimal::ZERO) {
        Some(a) => Err(ValidationError::NegativeAllowance {
            category: a.category,
            amount: a.amount,
        }),
        None => Ok(()),
    }
}

/// Aggregates `allowances` into capped per-category deductions.
///
/// # Errors
///
/// Returns [`ValidationError::NegativeAllowance`] if any amount is negative,
/// or [`ValidationError::AmountOutOfRange`] if a category total overflows.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::aggregate_deductions;
/// use tax_core::{Allowance, DeductionLimits};
///
/// let allowances = [
///     Allowance::donation(dec!(150000)),
///     Allowance::k_receipt(dec!(20000)),
/// ];
/// let summary = aggregate_deductions(&allowances, &DeductionLimits::default()).unwrap();
///
/// assert_eq!(summary.donation, dec!(100000));
/// assert_eq!(summary.total, dec!(120000));
/// ```
pub fn aggregate_deductions(
    allowances: &[Allowance],
    limits: &DeductionLimits,
) -> Result<DeductionSummary, ValidationError> {
    validate_allowances(allowances)?;
    summarize_deductions(allowances, limits)
}

/// Caps and totals allowances already known to be non-negative.
pub(crate) fn summarize_deductions(
    allowances: &[Allowance],
    limits: &DeductionLimits,
) -> Result<DeductionSummary, ValidationError> {
    let donation = cap(
        sum_by_category(allowances, AllowanceCategory::Donation)?,
        limits.max_donation_deduction,
    );
    let k_receipt = cap(
        sum_by_category(allowances, AllowanceCategory::KReceipt)?,
        limits.max_k_receipt_deduction,
    );

    Ok(DeductionSummary {
        donation,
        k_receipt,
        total: donation + k_receipt,
    })
}

fn sum_by_category(
    allowances: &[Allowance],
    category: AllowanceCategory,
) -> Result<Decimal, ValidationError> {
    allowances
        .iter()
        .filter(|a| a.category == category)
        .try_fold(Decimal::ZERO, |sum, a| {
            sum.checked_add(a.amount)
                .ok_or(ValidationError::AmountOutOfRange(category))
        })
}
