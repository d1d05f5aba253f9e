//! Where employment income and deductions come from, per form layout.
//!
//! The legacy and enhanced FSR layouts store salary, social security and
//! deductions in different places. Each layout is an [`IncomeSource`]; the
//! [`IncomeMode`] is resolved once and hands out the matching source for a
//! beneficiary.
//!
//! | Concern | Legacy | Enhanced |
//! |---------|--------|----------|
//! | Gross salary | `{beneficiary}_gross_salary` of each current-employment entry | `gross_monthly_income` of each employment record |
//! | Social security | `social_sec_amt` (spouse: nested under `spouse`) | always 0 |
//! | Deductions | every current-employment entry | employment records flagged `is_current` |

use rust_decimal::Decimal;
use serde_json::Value;

use crate::amount::value_to_decimal;
use crate::calculations::common::saturating_sum;
use crate::calculations::income::deductions::{Deduction, collect_deductions};
use crate::form::{FormSnapshot, dig, is_truthy};
use crate::models::Beneficiary;

/// Salary, social security and deductions of one beneficiary.
pub trait IncomeSource {
    /// Unrounded monthly gross salary.
    fn gross_salary(&self) -> Decimal;

    /// Monthly social security income reported outside of payroll.
    fn social_security_amount(&self) -> Decimal;

    /// Payroll deductions, in form order.
    fn deductions(&self) -> Vec<Deduction<'_>>;
}

/// Form layout used to read employment data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IncomeMode {
    #[default]
    Legacy,
    Enhanced,
}

impl IncomeMode {
    /// Reads the layout flag of the form.
    pub fn from_form(form: &FormSnapshot) -> Self {
        if form.enhanced_fsr_active() {
            Self::Enhanced
        } else {
            Self::Legacy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Enhanced => "enhanced",
        }
    }

    /// Builds the income source of `beneficiary` for this layout.
    pub fn source<'a>(
        &self,
        form: &'a FormSnapshot,
        beneficiary: Beneficiary,
    ) -> Box<dyn IncomeSource + 'a> {
        match self {
            Self::Legacy => Box::new(LegacyIncomeSource::new(form, beneficiary)),
            Self::Enhanced => Box::new(EnhancedIncomeSource::new(form, beneficiary)),
        }
    }
}

/// Employment records of the enhanced layout.
pub fn employment_records(
    form: &FormSnapshot,
    beneficiary: Beneficiary,
) -> &[Value] {
    match beneficiary {
        Beneficiary::Veteran => form.array(&[
            "personal_data",
            "employment_history",
            "veteran",
            "employment_records",
        ]),
        Beneficiary::Spouse => form.array(&[
            "personal_data",
            "employment_history",
            "spouse",
            "sp_employment_records",
        ]),
    }
}

/// Current-employment entries of the legacy layout.
pub fn current_employment(
    form: &FormSnapshot,
    beneficiary: Beneficiary,
) -> &[Value] {
    match beneficiary {
        Beneficiary::Veteran => form.array(&["curr_employment"]),
        Beneficiary::Spouse => form.array(&["sp_curr_employment"]),
    }
}

/// Enhanced layout: one list of employment records per beneficiary.
#[derive(Debug, Clone)]
pub struct EnhancedIncomeSource<'a> {
    employment_records: &'a [Value],
}

impl<'a> EnhancedIncomeSource<'a> {
    pub fn new(
        form: &'a FormSnapshot,
        beneficiary: Beneficiary,
    ) -> Self {
        Self {
            employment_records: employment_records(form, beneficiary),
        }
    }
}

impl IncomeSource for EnhancedIncomeSource<'_> {
    fn gross_salary(&self) -> Decimal {
        saturating_sum(
            self.employment_records
                .iter()
                .map(|record| value_to_decimal(dig(record, &["gross_monthly_income"]))),
        )
    }

    fn social_security_amount(&self) -> Decimal {
        Decimal::ZERO
    }

    fn deductions(&self) -> Vec<Deduction<'_>> {
        let mut deductions = Vec::new();
        for record in self
            .employment_records
            .iter()
            .filter(|record| is_truthy(dig(record, &["is_current"])))
        {
            collect_deductions(dig(record, &["deductions"]), &mut deductions);
        }
        deductions
    }
}

/// Legacy layout: parallel current-employment lists plus a separate social
/// security section.
#[derive(Debug, Clone)]
pub struct LegacyIncomeSource<'a> {
    beneficiary: Beneficiary,
    current_employment: &'a [Value],
    social_security: &'a Value,
}

impl<'a> LegacyIncomeSource<'a> {
    pub fn new(
        form: &'a FormSnapshot,
        beneficiary: Beneficiary,
    ) -> Self {
        Self {
            beneficiary,
            current_employment: current_employment(form, beneficiary),
            social_security: form.section(&["social_security"]),
        }
    }
}

impl IncomeSource for LegacyIncomeSource<'_> {
    fn gross_salary(&self) -> Decimal {
        let key = self.beneficiary.gross_salary_key();
        saturating_sum(
            self.current_employment
                .iter()
                .map(|entry| value_to_decimal(dig(entry, &[key]))),
        )
    }

    fn social_security_amount(&self) -> Decimal {
        let path: &[&str] = match self.beneficiary {
            Beneficiary::Veteran => &["social_sec_amt"],
            Beneficiary::Spouse => &["spouse", "social_sec_amt"],
        };
        value_to_decimal(dig(self.social_security, path))
    }

    fn deductions(&self) -> Vec<Deduction<'_>> {
        let mut deductions = Vec::new();
        for entry in self.current_employment {
            collect_deductions(dig(entry, &["deductions"]), &mut deductions);
        }
        deductions
    }
}
