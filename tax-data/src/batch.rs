//! Batch calculation over imported CSV rows.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::{BracketResult, DeductionLimits, TaxCalculator, TaxComputationResult};
use tracing::{debug, warn};

use crate::import::{BatchImportError, ImportedRow, read_inputs};

/// Result of one batch row.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchLine {
    pub row: usize,
    pub total_income: Decimal,
    pub result: TaxComputationResult,
}

/// Lazily imports and calculates every row of `reader`, in row order.
///
/// Each row is an independent engine call; an error on one row is reported
/// for that row only.
pub fn run_batch<'a, R>(
    reader: R,
    calculator: TaxCalculator<'a>,
    limits: DeductionLimits,
) -> impl Iterator<Item = Result<BatchLine, BatchImportError>> + 'a
where
    R: Read + 'a,
{
    read_inputs(reader).map(move |imported| {
        let ImportedRow { row, input } = imported?;
        match calculator.calculate(&input, &limits) {
            Ok(result) => {
                debug!(row, tax = %result.total_tax_due, refund = %result.refund, "calculated row");
                Ok(BatchLine {
                    row,
                    total_income: input.gross_income,
                    result,
                })
            }
            Err(source) => {
                warn!(row, error = %source, "row rejected");
                Err(BatchImportError::Calculation { row, source })
            }
        }
    })
}

/// One bracket of a breakdown: `{"level", "tax"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxLevel {
    pub level: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

impl From<&BracketResult> for TaxLevel {
    fn from(bracket: &BracketResult) -> Self {
        Self {
            level: bracket.label.clone(),
            tax: bracket.amount,
        }
    }
}

/// Every bracket of `result`, in schedule order.
pub fn tax_levels(result: &TaxComputationResult) -> Vec<TaxLevel> {
    result.brackets.iter().map(TaxLevel::from).collect()
}

/// Wire shape of one batch row: `{totalIncome, tax, taxRefund, taxLevel}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_refund: Decimal,
    pub tax_level: Vec<TaxLevel>,
}

impl From<&BatchLine> for TaxLine {
    fn from(line: &BatchLine) -> Self {
        Self {
            total_income: line.total_income,
            tax: line.result.total_tax_due,
            tax_refund: line.result.refund,
            tax_level: tax_levels(&line.result),
        }
    }
}

/// Wire shape of a whole batch: `{"taxes": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub taxes: Vec<TaxLine>,
}

impl BatchReport {
    /// Runs the whole batch, failing on the first rejected row.
    pub fn collect<'a, R: Read + 'a>(
        reader: R,
        calculator: TaxCalculator<'a>,
        limits: DeductionLimits,
    ) -> Result<Self, BatchImportError> {
        let taxes = run_batch(reader, calculator, limits)
            .map(|line| line.map(|l| TaxLine::from(&l)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { taxes })
    }
}
