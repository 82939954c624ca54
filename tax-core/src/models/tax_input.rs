use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Allowance;

/// Inputs for one tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxInput {
    pub gross_income: Decimal,
    pub withholding: Decimal,
    pub allowances: Vec<Allowance>,
}

impl TaxInput {
    pub fn new(gross_income: Decimal) -> Self {
        Self {
            gross_income,
            ..Default::default()
        }
    }

    pub fn with_withholding(
        mut self,
        withholding: Decimal,
    ) -> Self {
        self.withholding = withholding;
        self
    }

    pub fn with_allowance(
        mut self,
        allowance: Allowance,
    ) -> Self {
        self.allowances.push(allowance);
        self
    }
}
