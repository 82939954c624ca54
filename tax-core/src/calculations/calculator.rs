//! Tax computation pipeline.
//!
//! Runs the stages in order, each feeding the next:
//!
//! | Step | Stage | Output |
//! |------|-------|--------|
//! | 1 | Validation | gross income, withholding and every allowance are non-negative |
//! | 2 | Deduction aggregation | capped donation + k-receipt deductions |
//! | 3 | Taxable income | gross − personal deduction − deductions, floored at 0 |
//! | 4 | Bracket evaluation | per-bracket tax and gross liability |
//! | 5 | Withholding reconciliation | tax due or refund |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxCalculator;
//! use tax_core::{Allowance, DeductionLimits, TaxInput};
//!
//! let input = TaxInput::new(dec!(500000))
//!     .with_withholding(dec!(25000))
//!     .with_allowance(Allowance::donation(dec!(0)));
//!
//! let calculator = TaxCalculator::standard();
//! let result = calculator.calculate(&input, &DeductionLimits::default()).unwrap();
//!
//! assert_eq!(result.total_tax_due, dec!(4000));
//! assert_eq!(result.refund, dec!(0));
//! assert_eq!(result.brackets[1].amount, dec!(29000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::BracketEvaluator;
use crate::calculations::deductions::{summarize_deductions, validate_allowances};
use crate::calculations::error::{BracketScheduleError, ValidationError};
use crate::calculations::taxable_income::income_after_deductions;
use crate::calculations::withholding::net_withholding;
use crate::{DeductionLimits, TaxBracket, TaxComputationResult, TaxInput};

/// Stateless tax calculator over a bracket schedule.
///
/// Holds nothing but a reference to the schedule, so a single instance can be
/// shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator<'a> {
    evaluator: BracketEvaluator<'a>,
}

impl TaxCalculator<'static> {
    /// Calculator using the standard personal income tax schedule.
    pub fn standard() -> Self {
        Self {
            evaluator: BracketEvaluator::standard(),
        }
    }
}

impl<'a> TaxCalculator<'a> {
    /// Creates a calculator over a custom bracket schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BracketScheduleError`] if the schedule is not a contiguous,
    /// ascending partition of `[0, ∞)`.
    pub fn new(brackets: &'a [TaxBracket]) -> Result<Self, BracketScheduleError> {
        Ok(Self {
            evaluator: BracketEvaluator::new(brackets)?,
        })
    }

    /// Computes tax due or refund for a single input.
    ///
    /// All inputs are validated before any computation; on failure no
    /// partial result is produced.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if gross income, withholding or any
    /// allowance amount is negative, or if a category's allowances add up
    /// past the decimal range.
    pub fn calculate(
        &self,
        input: &TaxInput,
        limits: &DeductionLimits,
    ) -> Result<TaxComputationResult, ValidationError> {
        validate_input(input)?;

        let deductions = summarize_deductions(&input.allowances, limits)?;
        debug!(
            donation = %deductions.donation,
            k_receipt = %deductions.k_receipt,
            total = %deductions.total,
            "aggregated deductions"
        );

        let taxable_income = income_after_deductions(
            input.gross_income,
            limits.personal_deduction,
            deductions.total,
        );

        let evaluation = self.evaluator.evaluate(taxable_income);
        debug!(
            taxable_income = %taxable_income,
            gross_liability = %evaluation.gross_liability,
            "evaluated brackets"
        );

        let reconciliation = net_withholding(evaluation.gross_liability, input.withholding);

        Ok(TaxComputationResult {
            total_tax_due: reconciliation.tax_due,
            refund: reconciliation.refund,
            brackets: evaluation.brackets,
            total_deductible: deductions.total,
            taxable_income,
            gross_liability: evaluation.gross_liability,
        })
    }

    /// Lazily computes one result per input, in input order.
    ///
    /// Each input is independent; a failing row does not stop the rows after
    /// it.
    pub fn calculate_batch<'s, I>(
        &'s self,
        inputs: I,
        limits: &'s DeductionLimits,
    ) -> impl Iterator<Item = Result<TaxComputationResult, ValidationError>> + 's
    where
        I: IntoIterator<Item = TaxInput>,
        I::IntoIter: 's,
    {
        inputs
            .into_iter()
            .map(move |input| self.calculate(&input, limits))
    }
}

impl Default for TaxCalculator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_input(input: &TaxInput) -> Result<(), ValidationError> {
    if input.gross_income < Decimal::ZERO {
        return Err(ValidationError::NegativeGrossIncome(input.gross_income));
    }
    if input.withholding < Decimal::ZERO {
        return Err(ValidationError::NegativeWithholding(input.withholding));
    }
    validate_allowances(&input.allowances)
}
