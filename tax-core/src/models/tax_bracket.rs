use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal bracket of a progressive schedule.
///
/// `max_income` of `None` marks the open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBracket {
    pub label: &'static str,
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

/// Tax attributed to a single bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResult {
    pub label: String,
    pub amount: Decimal,
}
