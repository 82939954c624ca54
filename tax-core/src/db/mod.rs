pub mod factory;
pub mod limits;
pub mod repository;

pub use factory::{DbConfig, RepositoryFactory, RepositoryRegistry};
pub use limits::{DeductionLimitError, load_deduction_limits, update_deduction_limit};
pub use repository::{RepositoryError, TaxConfigRepository};
