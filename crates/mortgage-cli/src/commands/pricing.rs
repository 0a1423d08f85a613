use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use mortgage_core::insurance::{self, INSURANCE_THRESHOLD_PERCENT};
use mortgage_core::pricing;
use mortgage_core::with_metadata;

/// Arguments for price interpretation
#[derive(Args)]
pub struct InterpretPriceArgs {
    /// Raw price text as typed (e.g. "450", "450.5", "450000")
    #[arg(long, allow_hyphen_values = true)]
    pub raw: String,
}

/// Arguments for the mortgage insurance premium
#[derive(Args)]
pub struct InsuranceArgs {
    /// Property price (shorthand accepted)
    #[arg(long)]
    pub price: String,

    /// Down payment as a percent of price
    #[arg(long, alias = "down", allow_hyphen_values = true)]
    pub down_payment: String,
}

pub fn run_interpret_price(args: InterpretPriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let interpreted = pricing::interpret_price(&args.raw);

    let mut warnings = Vec::new();
    if pricing::parse_decimal(&args.raw).is_none() {
        warnings.push(format!("'{}' is not a number; price treated as 0", args.raw));
    }

    let result = json!({
        "raw": args.raw,
        "interpreted_price": interpreted,
    });
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        "Price shorthand interpretation",
        &json!({ "raw": args.raw }),
        warnings,
        elapsed,
        result,
    ))?)
}

pub fn run_insurance(args: InsuranceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let price = pricing::interpret_price(&args.price);
    let down_payment = pricing::parse_field("down_payment_percent", &args.down_payment)?;
    let premium = insurance::calculate_insurance_premium(price, down_payment)?;
    let rate = insurance::insurance_rate(down_payment);

    let mut warnings = Vec::new();
    if rate.is_none() {
        warnings.push(format!(
            "Down payment of {}% is at or above {INSURANCE_THRESHOLD_PERCENT}%; no insurance required",
            down_payment
        ));
    }

    let result = json!({
        "price": price,
        "down_payment_percent": down_payment,
        "loan_to_value": insurance::loan_to_value(down_payment),
        "insurance_rate": rate.unwrap_or(Decimal::ZERO),
        "premium": premium,
    });
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        "Mortgage insurance premium (price x LTV x tier rate)",
        &json!({ "price": args.price, "down_payment_percent": down_payment }),
        warnings,
        elapsed,
        result,
    ))?)
}
