pub mod amount;
pub mod calculations;
pub mod form;
pub mod models;

pub use calculations::{IncomeCalculator, IncomeMode};
pub use form::{FormError, FormSnapshot};
pub use models::*;
