//! Payroll deduction classification.
//!
//! Deductions entered on the form are free-form (name, amount) pairs. They are
//! sorted into four buckets by exact, case-sensitive name match:
//!
//! | Bucket | Names |
//! |--------|-------|
//! | Taxes | `State tax`, `Federal tax`, `Local tax` |
//! | Retirement | `Retirement accounts (401k, IRAs, 403b, TSP)`, `401K`, `IRA`, `Pension` |
//! | Social security | `FICA (Social Security and Medicare)` |
//! | Other | any other name |
//!
//! A deduction without a name belongs to no bucket: it adds nothing to the
//! other-deduction amount and does not appear in the other-deduction names.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use serde_json::json;
//! use fsr_core::calculations::income::{Deduction, classify_deductions};
//!
//! let raw = json!([
//!     {"name": "Federal tax", "amount": "$300.00"},
//!     {"name": "401K", "amount": "150"},
//!     {"name": "Union dues", "amount": "25.50"},
//! ]);
//! let deductions: Vec<Deduction> = raw
//!     .as_array()
//!     .unwrap()
//!     .iter()
//!     .filter_map(Deduction::from_value)
//!     .collect();
//!
//! let breakdown = classify_deductions(&deductions);
//!
//! assert_eq!(breakdown.taxes, dec!(300.00));
//! assert_eq!(breakdown.retirement, dec!(150));
//! assert_eq!(breakdown.other_deductions.name, "Union dues");
//! assert_eq!(breakdown.total(), dec!(475.50));
//! ```

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::trace;

use crate::amount::value_to_currency;
use crate::calculations::common::saturating_sum;
use crate::form::{dig, str_field};
use crate::models::{DeductionBreakdown, OtherDeductions};

pub const TAX_FILTERS: [&str; 3] = ["State tax", "Federal tax", "Local tax"];

pub const RETIREMENT_FILTERS: [&str; 4] = [
    "Retirement accounts (401k, IRAs, 403b, TSP)",
    "401K",
    "IRA",
    "Pension",
];

pub const SOCIAL_SECURITY_FILTERS: [&str; 1] = ["FICA (Social Security and Medicare)"];

/// Bucket a named deduction falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeductionCategory {
    Taxes,
    Retirement,
    SocialSecurity,
    Other,
}

impl DeductionCategory {
    /// Classifies a deduction name. Unnamed deductions have no category.
    pub fn classify(name: Option<&str>) -> Option<Self> {
        let name = name?;
        let category = if TAX_FILTERS.contains(&name) {
            Self::Taxes
        } else if RETIREMENT_FILTERS.contains(&name) {
            Self::Retirement
        } else if SOCIAL_SECURITY_FILTERS.contains(&name) {
            Self::SocialSecurity
        } else {
            Self::Other
        };
        Some(category)
    }
}

/// A single payroll deduction read from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction<'a> {
    pub name: Option<&'a str>,
    pub amount: Decimal,
}

impl<'a> Deduction<'a> {
    /// Reads a deduction entry. Returns `None` when the entry is not an
    /// object; a missing or non-string name is kept as `None`.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        if !value.is_object() {
            trace!(?value, "skipping deduction entry that is not an object");
            return None;
        }

        Some(Self {
            name: str_field(value, "name"),
            amount: value_to_currency(dig(value, &["amount"])),
        })
    }

    pub fn category(&self) -> Option<DeductionCategory> {
        DeductionCategory::classify(self.name)
    }
}

/// Appends the deductions found in `value` to `out`.
///
/// Lists are flattened to any depth; objects are read as deductions; anything
/// else (null, numbers, strings) is ignored.
pub fn collect_deductions<'a>(
    value: &'a Value,
    out: &mut Vec<Deduction<'a>>,
) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_deductions(item, out);
            }
        }
        Value::Object(_) => out.extend(Deduction::from_value(value)),
        Value::Null => {}
        other => trace!(value = ?other, "ignoring non-deduction value"),
    }
}

/// Sums the deductions that fall into `category`.
fn sum_category(
    deductions: &[Deduction<'_>],
    category: DeductionCategory,
) -> Decimal {
    saturating_sum(
        deductions
            .iter()
            .filter(|d| d.category() == Some(category))
            .map(|d| d.amount),
    )
}

/// Joins the names of the uncategorised deductions, in input order.
fn other_deduction_names(deductions: &[Deduction<'_>]) -> String {
    deductions
        .iter()
        .filter(|d| d.category() == Some(DeductionCategory::Other))
        .filter_map(|d| d.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Buckets `deductions` into taxes, retirement, social security and other.
///
/// Sums keep full precision; rounding is left to the caller.
pub fn classify_deductions(deductions: &[Deduction<'_>]) -> DeductionBreakdown {
    let breakdown = DeductionBreakdown {
        taxes: sum_category(deductions, DeductionCategory::Taxes),
        retirement: sum_category(deductions, DeductionCategory::Retirement),
        social_security: sum_category(deductions, DeductionCategory::SocialSecurity),
        other_deductions: OtherDeductions {
            name: other_deduction_names(deductions),
            amount: sum_category(deductions, DeductionCategory::Other),
        },
    };

    trace!(
        count = deductions.len(),
        taxes = %breakdown.taxes,
        retirement = %breakdown.retirement,
        social_security = %breakdown.social_security,
        other = %breakdown.other_deductions.amount,
        "classified deductions"
    );

    breakdown
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn deduction(
        name: Option<&'static str>,
        amount: Decimal,
    ) -> Deduction<'static> {
        Deduction { name, amount }
    }

    // =========================================================================
    // classify tests
    // =========================================================================

    #[test]
    fn classify_tax_names() {
        for name in TAX_FILTERS {
            assert_eq!(
                DeductionCategory::classify(Some(name)),
                Some(DeductionCategory::Taxes)
            );
        }
    }

    #[test]
    fn classify_retirement_names() {
        for name in RETIREMENT_FILTERS {
            assert_eq!(
                DeductionCategory::classify(Some(name)),
                Some(DeductionCategory::Retirement)
            );
        }
    }

    #[test]
    fn classify_fica() {
        assert_eq!(
            DeductionCategory::classify(Some("FICA (Social Security and Medicare)")),
            Some(DeductionCategory::SocialSecurity)
        );
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert_eq!(
            DeductionCategory::classify(Some("401K")),
            Some(DeductionCategory::Retirement)
        );
        assert_eq!(
            DeductionCategory::classify(Some("401k")),
            Some(DeductionCategory::Other)
        );
        assert_eq!(
            DeductionCategory::classify(Some("federal tax")),
            Some(DeductionCategory::Other)
        );
    }

    #[test]
    fn classify_unnamed_has_no_category() {
        assert_eq!(DeductionCategory::classify(None), None);
    }

    // =========================================================================
    // from_value tests
    // =========================================================================

    #[test]
    fn from_value_parses_currency_amount() {
        let raw = json!({"name": "IRA", "amount": "$1,234.56"});

        let parsed = Deduction::from_value(&raw).unwrap();

        assert_eq!(parsed, deduction(Some("IRA"), dec!(1234.56)));
    }

    #[test]
    fn from_value_missing_fields_default() {
        let raw = json!({});

        let parsed = Deduction::from_value(&raw).unwrap();

        assert_eq!(parsed, deduction(None, Decimal::ZERO));
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert_eq!(Deduction::from_value(&json!(0)), None);
        assert_eq!(Deduction::from_value(&json!("Federal tax")), None);
    }

    // =========================================================================
    // collect_deductions tests
    // =========================================================================

    #[test]
    fn collect_flattens_nested_lists() {
        let raw = json!([
            [{"name": "IRA", "amount": "1"}],
            {"name": "Pension", "amount": "2"},
            null,
            0,
            [[{"name": "Local tax", "amount": "3"}]]
        ]);
        let mut out = Vec::new();

        collect_deductions(&raw, &mut out);

        let names: Vec<_> = out.iter().map(|d| d.name).collect();
        assert_eq!(names, vec![Some("IRA"), Some("Pension"), Some("Local tax")]);
    }

    // =========================================================================
    // classify_deductions tests
    // =========================================================================

    #[test]
    fn classify_deductions_empty_is_zero() {
        let breakdown = classify_deductions(&[]);

        assert_eq!(breakdown, DeductionBreakdown::default());
    }

    #[test]
    fn classify_deductions_sums_each_bucket() {
        let deductions = vec![
            deduction(Some("State tax"), dec!(100.10)),
            deduction(Some("Federal tax"), dec!(200.20)),
            deduction(Some("401K"), dec!(50)),
            deduction(Some("Pension"), dec!(25)),
            deduction(Some("FICA (Social Security and Medicare)"), dec!(76.50)),
            deduction(Some("Union dues"), dec!(10)),
            deduction(Some("Parking"), dec!(5.25)),
        ];

        let breakdown = classify_deductions(&deductions);

        assert_eq!(breakdown.taxes, dec!(300.30));
        assert_eq!(breakdown.retirement, dec!(75));
        assert_eq!(breakdown.social_security, dec!(76.50));
        assert_eq!(
            breakdown.other_deductions,
            OtherDeductions {
                name: "Union dues, Parking".to_string(),
                amount: dec!(15.25),
            }
        );
        assert_eq!(breakdown.total(), dec!(467.05));
    }

    #[test]
    fn classify_deductions_keeps_full_precision() {
        let deductions = vec![
            deduction(Some("Local tax"), dec!(0.333)),
            deduction(Some("Local tax"), dec!(0.333)),
        ];

        let breakdown = classify_deductions(&deductions);

        assert_eq!(breakdown.taxes, dec!(0.666));
    }

    #[test]
    fn classify_deductions_skips_unnamed_in_amount_and_names() {
        let deductions = vec![
            deduction(Some("Gym"), dec!(30)),
            deduction(None, dec!(999)),
            deduction(Some("Parking"), dec!(5)),
        ];

        let breakdown = classify_deductions(&deductions);

        assert_eq!(breakdown.other_deductions.name, "Gym, Parking");
        assert_eq!(breakdown.other_deductions.amount, dec!(35));
        assert_eq!(breakdown.total(), dec!(35));
    }

    #[test]
    fn classify_deductions_repeats_duplicate_other_names() {
        let deductions = vec![
            deduction(Some("Parking"), dec!(5)),
            deduction(Some("Parking"), dec!(5)),
        ];

        let breakdown = classify_deductions(&deductions);

        assert_eq!(breakdown.other_deductions.name, "Parking, Parking");
    }
}
