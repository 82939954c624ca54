use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::non_negative;
use crate::calculations::error::ValidationError;

/// Liability netted against withholding credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub tax_due: Decimal,
    pub refund: Decimal,
}

/// Nets `gross_liability` against `withholding`.
///
/// Exactly one side is non-zero unless the two are equal, in which case both
/// are zero.
///
/// # Errors
///
/// Returns [`ValidationError::NegativeWithholding`] if `withholding < 0`.
pub fn reconcile_withholding(
    gross_liability: Decimal,
    withholding: Decimal,
) -> Result<Reconciliation, ValidationError> {
    if withholding < Decimal::ZERO {
        return Err(ValidationError::NegativeWithholding(withholding));
    }

    Ok(net_withholding(gross_liability, withholding))
}

pub(crate) fn net_withholding(
    gross_liability: Decimal,
    withholding: Decimal,
) -> Reconciliation {
    Reconciliation {
        tax_due: non_negative(gross_liability - withholding),
        refund: non_negative(withholding - gross_liability),
    }
}
