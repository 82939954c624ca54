use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BracketResult;

/// Outcome of a tax computation.
///
/// At most one of `total_tax_due` and `refund` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputationResult {
    pub total_tax_due: Decimal,
    pub refund: Decimal,
    pub brackets: Vec<BracketResult>,

    // Intermediate values, kept for diagnostics
    pub total_deductible: Decimal,
    pub taxable_income: Decimal,
    pub gross_liability: Decimal,
}
