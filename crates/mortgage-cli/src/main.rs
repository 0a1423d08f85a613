mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::compare::CompareArgs;
use commands::loan::LoanArgs;
use commands::pricing::{InsuranceArgs, InterpretPriceArgs};
use commands::scenario::ExportCsvArgs;

/// Mortgage payment, amortization, comparison and stress-test calculations
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Mortgage payment and amortization calculations",
    long_about = "A CLI for computing mortgage payments with decimal precision. Supports \
                  price shorthand, validation, insurance premiums, full amortization \
                  schedules, accelerated frequencies, A/B comparison and rate stress tests."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a raw price string ("450" -> 450,000)
    InterpretPrice(InterpretPriceArgs),
    /// Check a parameter set against the lending rules
    Validate(LoanArgs),
    /// Calculate the mortgage insurance premium
    Insurance(InsuranceArgs),
    /// Run one scenario: payment, totals, insurance and schedule
    Scenario(LoanArgs),
    /// Amortization schedule only
    Schedule(LoanArgs),
    /// Schedule aggregated into one row per year
    Summary(LoanArgs),
    /// Compare two scenarios side by side
    Compare(CompareArgs),
    /// Payment at base rate, +2 and +5 percentage points
    StressTest(LoanArgs),
    /// Export the schedule as CSV
    ExportCsv(ExportCsvArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "mortgage=debug,mortgage_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::InterpretPrice(args) => commands::pricing::run_interpret_price(args),
        Commands::Validate(args) => commands::scenario::run_validate(args),
        Commands::Insurance(args) => commands::pricing::run_insurance(args),
        Commands::Scenario(args) => commands::scenario::run_scenario_cmd(args),
        Commands::Schedule(args) => commands::scenario::run_schedule(args),
        Commands::Summary(args) => commands::scenario::run_summary(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::StressTest(args) => commands::compare::run_stress_test(args),
        Commands::ExportCsv(args) => commands::scenario::run_export_csv(args).map(|()| Value::Null),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(Value::Null) => process::exit(0),
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
