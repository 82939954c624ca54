mod allowance;
mod deduction_limits;
mod tax_bracket;
mod tax_config;
mod tax_input;
mod tax_result;

pub use allowance::{Allowance, AllowanceCategory};
pub use deduction_limits::{
    DEFAULT_MAX_K_RECEIPT_DEDUCTION, DEFAULT_PERSONAL_DEDUCTION, DeductionLimits,
    MAX_DONATION_DEDUCTION,
};
pub use tax_bracket::{BracketResult, TaxBracket};
pub use tax_config::{ConfigKey, TaxConfig};
pub use tax_input::TaxInput;
pub use tax_result::TaxComputationResult;
