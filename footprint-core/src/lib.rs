pub mod calculator;
pub mod comparison;
pub mod error;
pub mod factors;
pub mod history;
pub mod insights;
pub mod log_store;
pub mod sanitize;

pub use calculator::{compute, EmissionsCalculator};
pub use comparison::compare;
pub use error::FootprintError;
