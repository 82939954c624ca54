use rust_decimal::Decimal;

use crate::calculations::common::non_negative;
use crate::calculations::error::ValidationError;

/// Gross income less the personal deduction and capped allowances,
/// floored at zero.
///
/// # Errors
///
/// Returns [`ValidationError::NegativeGrossIncome`] if `gross_income < 0`.
pub fn resolve_taxable_income(
    gross_income: Decimal,
    personal_deduction: Decimal,
    total_deductible: Decimal,
) -> Result<Decimal, ValidationError> {
    if gross_income < Decimal::ZERO {
        return Err(ValidationError::NegativeGrossIncome(gross_income));
    }

    Ok(income_after_deductions(gross_income, personal_deduction, total_deductible))
}

pub(crate) fn income_after_deductions(
    gross_income: Decimal,
    personal_deduction: Decimal,
    total_deductible: Decimal,
) -> Decimal {
    non_negative(gross_income - personal_deduction - total_deductible)
}
