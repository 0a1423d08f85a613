use clap::Args;
use serde_json::{json, Value};
use std::fs::File;
use std::io;
use std::time::Instant;
use tracing::info;

use mortgage_core::export::{self, write_schedule_csv};
use mortgage_core::{run_scenario, validate, with_metadata};

use super::loan::{self, LoanArgs};

const AMORTIZATION_METHOD: &str = "Level-payment amortization (nominal annual rate / payments per year)";

/// Arguments for CSV export of the schedule
#[derive(Args)]
pub struct ExportCsvArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Write to this path instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run_validate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let params = loan::resolve(&args)?;

    let result = match validate(&params) {
        Ok(loan) => json!({ "valid": true, "loan": loan }),
        Err(e) => json!({ "valid": false, "error": e, "message": e.to_string() }),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        "Loan parameter validation",
        &params,
        Vec::new(),
        elapsed,
        result,
    ))?)
}

pub fn run_scenario_cmd(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let params = loan::resolve(&args)?;
    let mut result = run_scenario(&params)?;
    let warnings = std::mem::take(&mut result.warnings);

    info!(
        payment = %result.periodic_payment.round_dp(2),
        payments = result.number_of_payments,
        "scenario computed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        AMORTIZATION_METHOD,
        &params,
        warnings,
        elapsed,
        result,
    ))?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let params = loan::resolve(&args)?;
    let mut result = run_scenario(&params)?;
    let warnings = std::mem::take(&mut result.warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        AMORTIZATION_METHOD,
        &params,
        warnings,
        elapsed,
        json!({
            "periodic_payment": result.periodic_payment,
            "total_interest": result.total_interest,
            "schedule": result.schedule,
        }),
    ))?)
}

/// One row per year of the schedule, for chart feeds.
pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let params = loan::resolve(&args)?;
    let mut result = run_scenario(&params)?;
    let warnings = std::mem::take(&mut result.warnings);
    let years = export::yearly_summary(&result.schedule, result.payments_per_year);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        "Amortization schedule aggregated by year",
        &params,
        warnings,
        elapsed,
        json!({
            "periodic_payment": result.periodic_payment,
            "total_interest": result.total_interest,
            "years": years,
        }),
    ))?)
}

pub fn run_export_csv(args: ExportCsvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = loan::resolve(&args.loan)?;
    let result = run_scenario(&params)?;

    match args.out {
        Some(ref path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create '{path}': {e}"))?;
            write_schedule_csv(&result.schedule, file)?;
            info!(path = %path, rows = result.schedule.len(), "schedule exported");
        }
        None => write_schedule_csv(&result.schedule, io::stdout().lock())?,
    }
    Ok(())
}
