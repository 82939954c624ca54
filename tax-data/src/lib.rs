//! CSV batch import and calculation.

pub mod batch;
pub mod import;

pub use batch::{BatchLine, BatchReport, TaxLevel, TaxLine, run_batch, tax_levels};
pub use import::{BatchImportError, ImportedRow, TaxInputRecord, read_inputs};
