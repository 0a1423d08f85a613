use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use mortgage_core::{compare_scenarios, stress_test, with_metadata, LoanParameters};

use super::loan::{self, LoanArgs};
use crate::input;

/// Arguments for side-by-side comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Parameter file (JSON or YAML) for scenario A
    #[arg(long)]
    pub scenario_a: String,

    /// Parameter file (JSON or YAML) for scenario B
    #[arg(long)]
    pub scenario_b: String,

    /// Omit the two full schedules from the output
    #[arg(long)]
    pub summary_only: bool,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let a: LoanParameters = input::file::read_structured(&args.scenario_a)?;
    let b: LoanParameters = input::file::read_structured(&args.scenario_b)?;

    let mut comparison = compare_scenarios(&a, &b)?;

    let mut warnings = Vec::new();
    for (label, scenario) in [("A", &mut comparison.scenario_a), ("B", &mut comparison.scenario_b)] {
        warnings.extend(
            std::mem::take(&mut scenario.warnings)
                .into_iter()
                .map(|w| format!("Scenario {label}: {w}")),
        );
        if args.summary_only {
            scenario.schedule.clear();
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        "Side-by-side scenario comparison (B - A)",
        &json!({ "scenario_a": a, "scenario_b": b }),
        warnings,
        elapsed,
        comparison,
    ))?)
}

pub fn run_stress_test(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let params = loan::resolve(&args)?;
    let result = stress_test(&params)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        "Rate stress test at base, +2 and +5 percentage points",
        &params,
        Vec::new(),
        elapsed,
        result,
    ))?)
}
