//! Monthly income aggregation for the Financial Status Report.
//!
//! For each beneficiary (veteran and spouse) the calculator combines:
//!
//! 1. gross salary and payroll deductions, read through the layout's
//!    [`IncomeSource`](super::IncomeSource);
//! 2. VA benefits (disability compensation and education);
//! 3. social security reported outside of payroll (legacy layout only);
//! 4. additional income records.
//!
//! # Rounding
//!
//! Gross salary is rounded to cents before deductions are subtracted. The
//! deduction buckets, total deductions and net take-home pay keep full
//! precision. Each other-income component is rounded before they are added,
//! and the other-income amount and the monthly total are rounded once more.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fsr_core::FormSnapshot;
//! use fsr_core::calculations::income::IncomeCalculator;
//!
//! let form: FormSnapshot = r#"{
//!     "view:enhanced_financial_status_report": true,
//!     "personal_data": {"employment_history": {"veteran": {"employment_records": [
//!         {"gross_monthly_income": 3000, "is_current": true,
//!          "deductions": [{"name": "Federal tax", "amount": "300"}]}
//!     ]}}}
//! }"#.parse().unwrap();
//!
//! let income = IncomeCalculator::new(&form).monthly_income();
//!
//! assert_eq!(income.vet_income.net_take_home_pay, dec!(2700));
//! assert_eq!(income.total_monthly_net_income, dec!(2700.00));
//! ```

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::amount::value_to_decimal;
use crate::calculations::common::{
    round_half_up, saturating_add, saturating_sub, saturating_sum,
};
use crate::calculations::income::deductions::classify_deductions;
use crate::calculations::income::sources::IncomeMode;
use crate::form::{FormSnapshot, dig, str_field};
use crate::models::{Beneficiary, IncomeSummary, MonthlyIncome, OtherIncome};

/// VA benefits received by one beneficiary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Benefits {
    pub compensation: Decimal,
    pub education: Decimal,
}

impl Benefits {
    pub fn total(&self) -> Decimal {
        saturating_add(self.compensation, self.education)
    }
}

/// Builds the other-income label: benefit types first, in a fixed order,
/// then the names of the additional income records.
fn other_income_name(
    social_security: Decimal,
    benefits: &Benefits,
    additional_income: &[Value],
) -> String {
    let benefit_types = [
        (social_security, "Social Security"),
        (benefits.compensation, "Disability Compensation"),
        (benefits.education, "Education"),
    ];

    benefit_types
        .into_iter()
        .filter(|(amount, _)| *amount > Decimal::ZERO)
        .map(|(_, label)| label)
        .chain(
            additional_income
                .iter()
                .filter_map(|record| str_field(record, "name")),
        )
        .collect::<Vec<_>>()
        .join(", ")
}

/// Computes monthly net income of the veteran and spouse from a form.
#[derive(Debug, Clone)]
pub struct IncomeCalculator<'a> {
    form: &'a FormSnapshot,
    mode: IncomeMode,
}

impl<'a> IncomeCalculator<'a> {
    /// Creates a calculator using the layout flagged on the form.
    pub fn new(form: &'a FormSnapshot) -> Self {
        Self {
            form,
            mode: IncomeMode::from_form(form),
        }
    }

    /// Forces a layout regardless of the form's flag.
    pub fn with_mode(
        mut self,
        mode: IncomeMode,
    ) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> IncomeMode {
        self.mode
    }

    /// Computes both summaries and the combined monthly net income.
    ///
    /// A spouse summary is always produced; when the form has no spouse data
    /// every amount in it is zero.
    pub fn monthly_income(&self) -> MonthlyIncome {
        debug!(mode = self.mode.as_str(), "calculating monthly income");

        let vet_income = self.calculate_income(Beneficiary::Veteran);
        let sp_income = self.calculate_income(Beneficiary::Spouse);
        let income = MonthlyIncome::combine(vet_income, Some(sp_income));

        debug!(
            total_monthly_net_income = %income.total_monthly_net_income,
            "monthly income calculated"
        );
        income
    }

    /// Computes the income summary of a single beneficiary.
    pub fn calculate_income(
        &self,
        beneficiary: Beneficiary,
    ) -> IncomeSummary {
        let source = self.mode.source(self.form, beneficiary);

        let gross_salary = round_half_up(source.gross_salary());
        let social_security = source.social_security_amount();
        let deductions = classify_deductions(&source.deductions());
        let total_deductions = deductions.total();
        let net_take_home_pay = saturating_sub(gross_salary, total_deductions);

        let additional_income = self.additional_income(beneficiary);
        let additional_amount = saturating_sum(
            additional_income
                .iter()
                .map(|record| value_to_decimal(dig(record, &["amount"]))),
        );
        let benefits = self.benefits(beneficiary);

        let other_income_amount = round_half_up(saturating_sum([
            round_half_up(additional_amount),
            round_half_up(benefits.total()),
            round_half_up(social_security),
        ]));
        let total_monthly_net_income =
            round_half_up(saturating_add(net_take_home_pay, other_income_amount));

        debug!(
            beneficiary = beneficiary.as_str(),
            gross_salary = %gross_salary,
            total_deductions = %total_deductions,
            other_income = %other_income_amount,
            total_monthly_net_income = %total_monthly_net_income,
            "beneficiary income calculated"
        );

        IncomeSummary {
            gross_salary,
            deductions,
            total_deductions,
            net_take_home_pay,
            other_income: OtherIncome {
                name: other_income_name(social_security, &benefits, additional_income),
                amount: other_income_amount,
            },
            total_monthly_net_income,
        }
    }

    /// Additional income records of `beneficiary`.
    pub fn additional_income(
        &self,
        beneficiary: Beneficiary,
    ) -> &'a [Value] {
        match beneficiary {
            Beneficiary::Veteran => self.form.array(&["additional_income", "addl_inc_records"]),
            Beneficiary::Spouse => {
                self.form
                    .array(&["additional_income", "spouse", "sp_addl_income"])
            }
        }
    }

    /// VA benefits of `beneficiary`. The veteran's are summed over the
    /// `income` list; the spouse's come from `benefits.spouse_benefits`.
    pub fn benefits(
        &self,
        beneficiary: Beneficiary,
    ) -> Benefits {
        match beneficiary {
            Beneficiary::Veteran => {
                let income = self.form.array(&["income"]);
                let sum_field = |key: &str| -> Decimal {
                    saturating_sum(
                        income
                            .iter()
                            .map(|item| value_to_decimal(dig(item, &[key]))),
                    )
                };
                Benefits {
                    compensation: sum_field("compensation_and_pension"),
                    education: sum_field("education"),
                }
            }
            Beneficiary::Spouse => {
                let spouse_benefits = self.form.section(&["benefits", "spouse_benefits"]);
                Benefits {
                    compensation: value_to_decimal(dig(
                        spouse_benefits,
                        &["compensation_and_pension"],
                    )),
                    education: value_to_decimal(dig(spouse_benefits, &["education"])),
                }
            }
        }
    }
}
