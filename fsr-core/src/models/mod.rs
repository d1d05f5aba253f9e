mod beneficiary;
mod income_summary;

pub use beneficiary::Beneficiary;
pub use income_summary::{
    DeductionBreakdown, IncomeSummary, MonthlyIncome, OtherDeductions, OtherIncome,
};
