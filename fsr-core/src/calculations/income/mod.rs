//! Financial Status Report income calculation.
//!
//! This module contains the deduction classifier, the legacy and enhanced
//! income sources, and the calculator that combines them into an
//! [`IncomeSummary`](crate::models::IncomeSummary) per beneficiary.

pub mod calculator;
pub mod deductions;
pub mod sources;

pub use calculator::{Benefits, IncomeCalculator};
pub use deductions::{
    Deduction, DeductionCategory, RETIREMENT_FILTERS, SOCIAL_SECURITY_FILTERS, TAX_FILTERS,
    classify_deductions, collect_deductions,
};
pub use sources::{EnhancedIncomeSource, IncomeMode, IncomeSource, LegacyIncomeSource};
