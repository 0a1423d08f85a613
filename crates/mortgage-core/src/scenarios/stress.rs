use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::scenarios::scenario::calculate;
use crate::types::{Money, PaymentFrequency, Rate};
use crate::validation::{validate, LoanParameters, ValidatedLoan};

/// Rate shocks applied on top of the base rate, in percentage points.
pub const STRESS_SHOCKS_PERCENT: [Rate; 3] = [dec!(0), dec!(2), dec!(5)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressPoint {
    pub rate_shock_percent: Rate,
    pub annual_rate_percent: Rate,
    pub periodic_payment: Money,
    /// Increase over the base-rate payment.
    pub payment_increase: Money,
    /// `payment_increase / base payment`, as a fraction.
    pub payment_increase_pct: Rate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressTestResult {
    pub base_rate_percent: Rate,
    pub principal: Money,
    pub frequency: PaymentFrequency,
    pub amortization_years: u32,
    pub points: Vec<StressPoint>,
}

/// Periodic payment at the base rate, base + 2 and base + 5, every other
/// parameter held fixed.
///
/// Each shocked rate runs through the same scenario calculation as
/// [`run_scenario`](crate::run_scenario). Only the base parameter set is
/// validated; shocked rates may exceed the validation ceiling.
pub fn stress_test(params: &LoanParameters) -> Result<StressTestResult, ValidationError> {
    let loan = validate(params)?;

    let mut scenarios = Vec::with_capacity(STRESS_SHOCKS_PERCENT.len());
    for shock in STRESS_SHOCKS_PERCENT {
        let shocked = ValidatedLoan {
            interest_rate_percent: loan.interest_rate_percent + shock,
            ..loan.clone()
        };
        scenarios.push((shock, calculate(&shocked)?));
    }

    let base_payment = scenarios
        .first()
        .map(|(_, base)| base.periodic_payment)
        .unwrap_or(Decimal::ZERO);
    let principal = scenarios
        .first()
        .map(|(_, base)| base.principal)
        .unwrap_or(Decimal::ZERO);

    let points = scenarios
        .into_iter()
        .map(|(shock, scenario)| {
            let periodic_payment = scenario.periodic_payment;
            let payment_increase = periodic_payment - base_payment;
            let payment_increase_pct = if base_payment.is_zero() {
                Decimal::ZERO
            } else {
                payment_increase / base_payment
            };
            debug!(shock = %shock, payment = %periodic_payment, "stress point");
            StressPoint {
                rate_shock_percent: shock,
                annual_rate_percent: scenario.annual_rate_percent,
                periodic_payment,
                payment_increase,
                payment_increase_pct,
            }
        })
        .collect();

    Ok(StressTestResult {
        base_rate_percent: loan.interest_rate_percent,
        principal,
        frequency: loan.frequency,
        amortization_years: loan.amortization.years(),
        points,
    })
}
