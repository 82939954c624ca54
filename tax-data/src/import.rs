//! CSV import of tax calculation inputs.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header
//! names are case-sensitive. Cells are trimmed before parsing.
//!
//! | Column | Required | Type | Notes |
//! |--------------|----------|---------|-------------------------------------|
//! | `totalIncome`| yes | decimal | gross income |
//! | `wht` | yes | decimal | withholding already paid |
//! | `donation` | yes | decimal | donation allowance (alias `allowances`); may be empty |
//! | `kReceipt` | no | decimal | k-receipt allowance |
//! | `eShopping` | no | decimal | accepted, no deduction effect |
//!
//! ```csv
//! totalIncome,wht,donation
//! 500000.0,0.0,0.0
//! 600000.0,40000.0,20000.0
//! ```
//!
//! Rows are parsed lazily, one [`TaxInput`] per data row. Row numbers are
//! 1-based and count data rows only (the header is not row 1).

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{Allowance, TaxInput, ValidationError};
use thiserror::Error;

/// Errors that can occur while importing or calculating a batch.
#[derive(Debug, Error)]
pub enum BatchImportError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("Row {row}: '{column}' must be non-negative")]
    NegativeValue { column: &'static str, row: usize },

    #[error("Row {row}: {source}")]
    Calculation {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

/// A single record from the batch CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxInputRecord {
    #[serde(rename = "totalIncome", deserialize_with = "deserialize_decimal")]
    pub total_income: Decimal,
    #[serde(rename = "wht", deserialize_with = "deserialize_decimal")]
    pub withholding: Decimal,
    #[serde(alias = "allowances", deserialize_with = "deserialize_optional_decimal")]
    pub donation: Option<Decimal>,
    #[serde(
        rename = "kReceipt",
        default,
        deserialize_with = "deserialize_optional_decimal"
    )]
    pub k_receipt: Option<Decimal>,
    #[serde(
        rename = "eShopping",
        default,
        deserialize_with = "deserialize_optional_decimal"
    )]
    pub e_shopping: Option<Decimal>,
}

impl TaxInputRecord {
    /// Converts the record into an engine input, rejecting negative cells.
    ///
    /// Allowance columns that are empty or absent contribute nothing.
    pub fn into_input(
        self,
        row: usize,
    ) -> Result<TaxInput, BatchImportError> {
        let non_negative = |column: &'static str, value: Decimal| {
            if value < Decimal::ZERO {
                Err(BatchImportError::NegativeValue { column, row })
            } else {
                Ok(value)
            }
        };

        let mut input = TaxInput::new(non_negative("totalIncome", self.total_income)?)
            .with_withholding(non_negative("wht", self.withholding)?);

        let allowances = [
            ("donation", self.donation, Allowance::donation as fn(Decimal) -> Allowance),
            ("kReceipt", self.k_receipt, Allowance::k_receipt),
            ("eShopping", self.e_shopping, Allowance::e_shopping),
        ];
        for (column, value, make) in allowances {
            if let Some(amount) = value {
                input = input.with_allowance(make(non_negative(column, amount)?));
            }
        }

        Ok(input)
    }
}

/// One successfully imported CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRow {
    pub row: usize,
    pub input: TaxInput,
}

/// Lazily reads tax inputs from CSV, one item per data row.
///
/// The reader is consumed as the iterator advances; a malformed row yields
/// an error for that row and iteration may continue past it.
pub fn read_inputs<R: Read>(reader: R) -> impl Iterator<Item = Result<ImportedRow, BatchImportError>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize::<TaxInputRecord>()
        .enumerate()
        .map(|(index, record)| {
            let row = index + 1;
            let input = record?.into_input(row)?;
            Ok(ImportedRow { row, input })
        })
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim()
        .replace(',', "")
        .parse::<Decimal>()
        .map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .replace(',', "")
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
