use rust_decimal::Decimal;
use thiserror::Error;

use crate::AllowanceCategory;

/// Input rejected by the engine before any computation took place.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("gross income must be non-negative, got {0}")]
    NegativeGrossIncome(Decimal),

    #[error("withholding must be non-negative, got {0}")]
    NegativeWithholding(Decimal),

    #[error("{category} allowance must be non-negative, got {amount}")]
    NegativeAllowance {
        category: AllowanceCategory,
        amount: Decimal,
    },

    #[error("{0} allowances add up to more than can be represented")]
    AmountOutOfRange(AllowanceCategory),
}

/// A bracket schedule that does not describe a contiguous, ascending
/// partition of `[0, ∞)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    #[error("no tax brackets provided")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    NonZeroStart(Decimal),

    #[error("bracket {index} starts at {found}, expected {expected}")]
    Gap {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} upper bound {max} is not above its lower bound {min}")]
    EmptySpan {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),

    #[error("last bracket must be unbounded")]
    BoundedTop,

    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },
}
