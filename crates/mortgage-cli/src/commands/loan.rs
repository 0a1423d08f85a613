use clap::Args;
use serde_json::Value;
use tracing::debug;

use mortgage_core::{AmortizationPeriod, LoanParameters, PaymentFrequency};

use crate::input;

/// Loan parameters shared by every scenario-based command.
#[derive(Args, Debug)]
pub struct LoanArgs {
    /// Property price. Shorthand is accepted: "450" = 450,000, "1.2" = 1,200,000
    #[arg(long)]
    pub price: Option<String>,

    /// Down payment as a percent of price (e.g. 20)
    #[arg(long, alias = "down")]
    pub down_payment: Option<String>,

    /// Annual interest rate in percent (e.g. 5.25)
    #[arg(long)]
    pub rate: Option<String>,

    /// Annual property tax as a percent of price (e.g. 1.1)
    #[arg(long)]
    pub tax_rate: Option<String>,

    /// monthly, biweekly, accelerated_biweekly, weekly, accelerated_weekly
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequency,

    /// Amortization in years: 5, 10, 15, 20, 25 or 30
    #[arg(long, default_value = "25")]
    pub years: AmortizationPeriod,

    /// Path to a JSON or YAML parameter file (overrides stdin and flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Resolve parameters: `--input` file, then piped stdin, then flags.
pub fn resolve(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_structured(path);
    }
    let piped = input::stdin::read_stdin()?;
    resolve_with(args, piped)
}

/// Everything after the file check, with stdin already read.
fn resolve_with(
    args: &LoanArgs,
    piped: Option<Value>,
) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(data) = piped {
        debug!("reading parameters from stdin");
        return Ok(serde_json::from_value(data)?);
    }

    debug!("building parameters from flags");
    Ok(LoanParameters {
        property_price: args
            .price
            .clone()
            .ok_or("--price is required (or provide --input or piped stdin)")?,
        down_payment_percent: args
            .down_payment
            .clone()
            .ok_or("--down-payment is required (or provide --input)")?,
        interest_rate_percent: args
            .rate
            .clone()
            .ok_or("--rate is required (or provide --input)")?,
        property_tax_rate_percent: args.tax_rate.clone(),
        frequency: args.frequency,
        amortization: args.years,
    })
}
