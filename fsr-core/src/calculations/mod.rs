//! Calculation logic for the Financial Status Report (VA Form 5655).

pub mod common;
pub mod income;

pub use income::{IncomeCalculator, IncomeMode};
