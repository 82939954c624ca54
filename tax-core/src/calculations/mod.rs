//! Tax calculation pipeline for progressive personal income tax.
//!
//! Each stage lives in its own module and can be used on its own; the
//! [`TaxCalculator`] runs them end to end.

pub mod brackets;
pub mod calculator;
pub mod common;
pub mod deductions;
pub mod error;
pub mod taxable_income;
pub mod withholding;

pub use brackets::{BracketEvaluation, BracketEvaluator, STANDARD_BRACKETS};
pub use calculator::TaxCalculator;
pub use deductions::{DeductionSummary, aggregate_deductions, validate_allowances};
pub use error::{BracketScheduleError, ValidationError};
pub use taxable_income::resolve_taxable_income;
pub use withholding::{Reconciliation, reconcile_withholding};
