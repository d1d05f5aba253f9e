use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::calculations::common::{saturating_add, saturating_sum};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OtherDeductions {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionBreakdown {
    pub taxes: Decimal,
    pub retirement: Decimal,
    pub social_security: Decimal,
    pub other_deductions: OtherDeductions,
}

impl DeductionBreakdown {
    /// Sum of all four buckets, unrounded.
    pub fn total(&self) -> Decimal {
        saturating_sum([
            self.taxes,
            self.retirement,
            self.social_security,
            self.other_deductions.amount,
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OtherIncome {
    pub name: String,
    pub amount: Decimal,
}

/// Monthly income of one beneficiary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSummary {
    pub gross_salary: Decimal,
    pub deductions: DeductionBreakdown,
    pub total_deductions: Decimal,
    pub net_take_home_pay: Decimal,
    pub other_income: OtherIncome,
    pub total_monthly_net_income: Decimal,
}

/// Veteran and spouse summaries plus their combined monthly net income.
///
/// An absent spouse summary contributes nothing to the total and serializes
/// as an empty object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncome {
    pub vet_income: IncomeSummary,
    #[serde(serialize_with = "serialize_optional_summary")]
    pub sp_income: Option<IncomeSummary>,
    pub total_monthly_net_income: Decimal,
}

impl MonthlyIncome {
    /// Combines the two summaries. The spouse total is only added when a
    /// spouse summary was produced at all; a present all-zero summary still
    /// counts as present.
    pub fn combine(
        vet_income: IncomeSummary,
        sp_income: Option<IncomeSummary>,
    ) -> Self {
        let sp_sum = sp_income
            .as_ref()
            .map_or(Decimal::ZERO, |sp| sp.total_monthly_net_income);
        let total_monthly_net_income =
            saturating_add(vet_income.total_monthly_net_income, sp_sum);

        Self {
            vet_income,
            sp_income,
            total_monthly_net_income,
        }
    }
}

fn serialize_optional_summary<S>(
    summary: &Option<IncomeSummary>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeMap;

    match summary {
        Some(summary) => summary.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
