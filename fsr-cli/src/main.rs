use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fsr_core::{IncomeCalculator, IncomeMode};
use fsr_cli::{OutputFormat, logging, render_json, render_text};
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Monthly income calculator for the VA Financial Status Report (Form 5655).
///
/// Reads a submitted form payload (JSON), computes the veteran's and
/// spouse's monthly net income, and prints the result.
#[derive(Debug, Parser)]
#[command(name = "fsr-income")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the form payload. Reads stdin when omitted or `-`.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Indent JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Form layout to read. `auto` follows the form's own flag.
    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    mode: ModeArg,

    /// Log filter (e.g. `debug` or `warn,fsr_core=trace`). Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file as well as stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Auto,
    Legacy,
    Enhanced,
}

impl ModeArg {
    fn into_mode(self) -> Option<IncomeMode> {
        match self {
            Self::Auto => None,
            Self::Legacy => Some(IncomeMode::Legacy),
            Self::Enhanced => Some(IncomeMode::Enhanced),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(logging::LoggingConfig {
        level: cli.log_level.as_deref(),
        log_file: cli.log_file.as_deref(),
    })?;

    let form = fsr_cli::load(cli.file.as_deref()).context("Failed to load form payload")?;

    let mut calculator = IncomeCalculator::new(&form);
    if let Some(mode) = cli.mode.into_mode() {
        debug!(mode = mode.as_str(), "overriding form layout");
        calculator = calculator.with_mode(mode);
    }

    let income = calculator.monthly_income();
    info!(
        mode = calculator.mode().as_str(),
        total_monthly_net_income = %income.total_monthly_net_income,
        "calculated monthly income"
    );

    let output = match cli.format {
        OutputFormat::Json => {
            render_json(&income, cli.pretty).context("Failed to serialize income summary")?
        }
        OutputFormat::Text => render_text(&income),
    };
    print!("{output}");
    if cli.format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
