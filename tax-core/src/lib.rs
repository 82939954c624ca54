pub mod calculations;
pub mod db;
pub mod models;

pub use calculations::{BracketScheduleError, TaxCalculator, ValidationError};
pub use db::repository::{RepositoryError, TaxConfigRepository};
pub use models::*;
