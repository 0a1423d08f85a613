use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use mortgage_core::pricing::parse_field;
use mortgage_core::{AmortizationPeriod, LoanParameters, PaymentFrequency};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Price & validation
// ---------------------------------------------------------------------------

/// Interpreted price as a decimal string.
#[napi]
pub fn interpret_price(raw: String) -> String {
    mortgage_core::interpret_price(&raw).to_string()
}

/// `{"valid":true,"loan":{...}}` or `{"valid":false,"error":{"kind":..,"reason":..}}`.
#[napi]
pub fn validate_loan(params_json: String) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let value = match mortgage_core::validate(&params) {
        Ok(loan) => serde_json::json!({ "valid": true, "loan": loan }),
        Err(e) => serde_json::json!({ "valid": false, "error": e }),
    };
    serde_json::to_string(&value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Insurance
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_insurance_premium(price: String, down_payment_percent: String) -> NapiResult<String> {
    let price = parse_field("price", &price).map_err(to_napi_error)?;
    let down = parse_field("down_payment_percent", &down_payment_percent).map_err(to_napi_error)?;
    let premium = mortgage_core::calculate_insurance_premium(price, down).map_err(to_napi_error)?;
    Ok(premium.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AmortizationRequest {
    principal: Decimal,
    annual_rate_percent: Decimal,
    #[serde(default)]
    amortization_years: AmortizationPeriod,
    #[serde(default)]
    frequency: PaymentFrequency,
}

#[napi]
pub fn compute_amortization(input_json: String) -> NapiResult<String> {
    let req: AmortizationRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::compute_amortization(
        req.principal,
        req.annual_rate_percent,
        req.amortization_years,
        req.frequency,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn run_scenario(params_json: String) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let output = mortgage_core::run_scenario(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct CompareRequest {
    scenario_a: LoanParameters,
    scenario_b: LoanParameters,
}

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let req: CompareRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::compare_scenarios(&req.scenario_a, &req.scenario_b).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn stress_test(params_json: String) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let output = mortgage_core::stress_test(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[napi]
pub fn schedule_csv(params_json: String) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let output = mortgage_core::run_scenario(&params).map_err(to_napi_error)?;
    mortgage_core::export::schedule_to_csv(&output.schedule).map_err(to_napi_error)
}

#[napi]
pub fn yearly_summary(params_json: String) -> NapiResult<String> {
    let params: LoanParameters = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let output = mortgage_core::run_scenario(&params).map_err(to_napi_error)?;
    let years = mortgage_core::export::yearly_summary(&output.schedule, output.payments_per_year);
    serde_json::to_string(&years).map_err(to_napi_error)
}
