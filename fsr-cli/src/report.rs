//! Renders a [`MonthlyIncome`] for the terminal.

use std::fmt::Write;

use fsr_core::calculations::common::round_half_up;
use fsr_core::{IncomeSummary, MonthlyIncome};
use rust_decimal::Decimal;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Serializes the result as JSON, indented when `pretty` is set.
pub fn render_json(
    income: &MonthlyIncome,
    pretty: bool,
) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(income)
    } else {
        serde_json::to_string(income)
    }
}

fn money(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

fn push_line(
    out: &mut String,
    label: &str,
    value: Decimal,
) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "  {label:<24}{:>12}", money(value));
}

fn push_summary(
    out: &mut String,
    title: &str,
    summary: &IncomeSummary,
) {
    let _ = writeln!(out, "{title}");
    push_line(out, "Gross salary", summary.gross_salary);
    push_line(out, "Taxes", summary.deductions.taxes);
    push_line(out, "Retirement", summary.deductions.retirement);
    push_line(out, "Social security", summary.deductions.social_security);
    push_line(out, "Other deductions", summary.deductions.other_deductions.amount);
    if !summary.deductions.other_deductions.name.is_empty() {
        let _ = writeln!(out, "    ({})", summary.deductions.other_deductions.name);
    }
    push_line(out, "Total deductions", summary.total_deductions);
    push_line(out, "Net take-home pay", summary.net_take_home_pay);
    push_line(out, "Other income", summary.other_income.amount);
    if !summary.other_income.name.is_empty() {
        let _ = writeln!(out, "    ({})", summary.other_income.name);
    }
    push_line(out, "Monthly net income", summary.total_monthly_net_income);
}

/// Renders a plain-text report with one block per beneficiary.
pub fn render_text(income: &MonthlyIncome) -> String {
    let mut out = String::new();

    push_summary(&mut out, "Veteran", &income.vet_income);
    out.push('\n');
    match &income.sp_income {
        Some(spouse) => push_summary(&mut out, "Spouse", spouse),
        None => out.push_str("Spouse\n  (not calculated)\n"),
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "{:<26}{:>12}",
        "Total monthly net income",
        money(income.total_monthly_net_income)
    );

    out
}
