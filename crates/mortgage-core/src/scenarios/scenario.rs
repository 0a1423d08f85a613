use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amortization::{amortize, AmortizationEntry};
use crate::error::{MortgageError, ValidationError};
use crate::insurance::calculate_insurance_premium;
use crate::types::{Money, PaymentFrequency, Rate};
use crate::validation::{validate, LoanParameters, ValidatedLoan};
use crate::MortgageResult;

/// Everything the caller needs to display one loan scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub price: Money,
    pub down_payment_percent: Rate,
    pub down_payment_amount: Money,
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub frequency: PaymentFrequency,
    pub amortization_years: u32,
    pub payments_per_year: u32,
    pub number_of_payments: u32,
    pub periodic_payment: Money,
    pub total_interest: Money,
    /// Zero when the down payment is 20% or more.
    pub insurance_premium: Money,
    /// Zero when no property tax rate was given.
    pub property_tax_per_payment: Money,
    /// Periodic payment plus property tax per payment.
    pub total_periodic_outlay: Money,
    /// Total interest plus insurance premium.
    pub total_cost_of_borrowing: Money,
    pub warnings: Vec<String>,
    pub schedule: Vec<AmortizationEntry>,
}

/// Two scenarios side by side. Differences are B minus A.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenario_a: ScenarioResult,
    pub scenario_b: ScenarioResult,
    pub periodic_payment_difference: Money,
    pub total_interest_difference: Money,
    pub insurance_premium_difference: Money,
    pub total_cost_difference: Money,
}

/// Interpret, validate and amortize one parameter set.
///
/// Pure: identical parameters always produce an identical result.
pub fn run_scenario(params: &LoanParameters) -> Result<ScenarioResult, ValidationError> {
    let loan = validate(params)?;
    calculate(&loan)
}

/// Run two parameter sets independently and diff them.
pub fn compare_scenarios(
    a: &LoanParameters,
    b: &LoanParameters,
) -> MortgageResult<ScenarioComparison> {
    let scenario_a = run_scenario(a).map_err(|source| MortgageError::ScenarioFailed {
        label: "A".into(),
        source,
    })?;
    let scenario_b = run_scenario(b).map_err(|source| MortgageError::ScenarioFailed {
        label: "B".into(),
        source,
    })?;

    Ok(ScenarioComparison {
        periodic_payment_difference: scenario_b.periodic_payment - scenario_a.periodic_payment,
        total_interest_difference: scenario_b.total_interest - scenario_a.total_interest,
        insurance_premium_difference: scenario_b.insurance_premium
            - scenario_a.insurance_premium,
        total_cost_difference: scenario_b.total_cost_of_borrowing
            - scenario_a.total_cost_of_borrowing,
        scenario_a,
        scenario_b,
    })
}

/// Down payment amount and financed principal for a validated loan.
fn split_price(loan: &ValidatedLoan) -> (Money, Money) {
    let down_payment_amount = loan.price * loan.down_payment_percent / dec!(100);
    (down_payment_amount, loan.price - down_payment_amount)
}

/// Price every figure for a validated loan. Rates are not re-checked, so
/// callers may feed shocked rates above the validation ceiling.
pub(crate) fn calculate(loan: &ValidatedLoan) -> Result<ScenarioResult, ValidationError> {
    let (down_payment_amount, principal) = split_price(loan);
    let insurance_premium = calculate_insurance_premium(loan.price, loan.down_payment_percent)
        .map_err(|e| ValidationError::InvalidPrice(e.to_string()))?;

    debug!(
        price = %loan.price,
        principal = %principal,
        rate = %loan.interest_rate_percent,
        frequency = %loan.frequency,
        years = loan.amortization.years(),
        "running scenario"
    );

    let out = amortize(
        principal,
        loan.interest_rate_percent,
        loan.amortization,
        loan.frequency,
    )
    .map_err(|e| ValidationError::InvalidPrice(e.to_string()))?;

    let payments_per_year = loan.frequency.payments_per_year();
    let property_tax_per_payment = loan
        .property_tax_rate_percent
        .map(|rate| loan.price * rate / dec!(100) / Decimal::from(payments_per_year))
        .unwrap_or(Decimal::ZERO);

    let mut warnings = Vec::new();
    if !insurance_premium.is_zero() {
        warnings.push(format!(
            "Down payment of {}% is below 20%; mortgage insurance premium of {} applies",
            loan.down_payment_percent,
            insurance_premium.round_dp(2)
        ));
    }
    if let Some(last) = out.schedule.last() {
        if last.remaining_balance < dec!(-0.01) {
            warnings.push(format!(
                "Accelerated payments retire the loan early; final balance is {}",
                last.remaining_balance.round_dp(2)
            ));
        }
    }

    Ok(ScenarioResult {
        price: loan.price,
        down_payment_percent: loan.down_payment_percent,
        down_payment_amount,
        principal,
        annual_rate_percent: loan.interest_rate_percent,
        frequency: loan.frequency,
        amortization_years: loan.amortization.years(),
        payments_per_year,
        number_of_payments: out.number_of_payments,
        periodic_payment: out.periodic_payment,
        total_interest: out.total_interest,
        insurance_premium,
        property_tax_per_payment,
        total_periodic_outlay: out.periodic_payment + property_tax_per_payment,
        total_cost_of_borrowing: out.total_interest + insurance_premium,
        warnings,
        schedule: out.schedule,
    })
}
