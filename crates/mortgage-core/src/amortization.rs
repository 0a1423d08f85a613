//! Level-payment amortization.
//!
//! Payment sizing and the payment-by-payment schedule. All math in
//! `rust_decimal::Decimal`; the periodic rate is the nominal annual rate
//! divided by the number of payments per year.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{AmortizationPeriod, Money, PaymentFrequency, Rate};
use crate::MortgageResult;

/// Upper bound on the annual rate accepted by the public entry points.
/// Keeps `(1 + r)^n` well inside Decimal range for every supported term.
const MAX_ANNUAL_RATE_PERCENT: Rate = dec!(100);

/// Payments per year of the monthly-equivalent payment that accelerated
/// schedules are derived from.
const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One scheduled payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-indexed.
    pub payment_number: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Balance after this payment. Can dip slightly below zero on the final
    /// entry of an accelerated schedule.
    pub remaining_balance: Money,
    pub cumulative_interest: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub periodic_payment: Money,
    /// `periodic_payment * number_of_payments - principal`.
    pub total_interest: Money,
    pub periodic_rate: Rate,
    pub number_of_payments: u32,
    pub schedule: Vec<AmortizationEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full amortization schedule for a loan.
///
/// `annual_rate_percent` is nominal, in percent (5 = 5%). A zero rate is
/// allowed and repays the principal in equal instalments. Amounts too large
/// for 96-bit decimal arithmetic are reported as `InvalidInput`.
pub fn compute_amortization(
    principal: Money,
    annual_rate_percent: Rate,
    period: AmortizationPeriod,
    frequency: PaymentFrequency,
) -> MortgageResult<AmortizationOutput> {
    check_arguments(principal, annual_rate_percent)?;
    amortize(principal, annual_rate_percent, period, frequency)
}

/// Periodic payment only, without building the schedule.
pub fn periodic_payment(
    principal: Money,
    annual_rate_percent: Rate,
    period: AmortizationPeriod,
    frequency: PaymentFrequency,
) -> MortgageResult<Money> {
    check_arguments(principal, annual_rate_percent)?;
    payment_for(principal, annual_rate_percent, period, frequency)
}

/// Standard annuity payment `P * r / (1 - (1+r)^-n)`, or `P / n` when `r`
/// is zero.
///
/// Evaluated as `P * (r * (1+r)^n / ((1+r)^n - 1))` so the principal is only
/// multiplied by a factor close to `r`.
pub fn level_payment(principal: Money, periodic_rate: Rate, n: u32) -> MortgageResult<Money> {
    if n == 0 {
        return Ok(principal);
    }
    let count = Decimal::from(n);
    if periodic_rate.is_zero() {
        return Ok(principal / count);
    }
    let factor = Decimal::ONE
        .checked_add(periodic_rate)
        .and_then(|base| base.checked_powu(u64::from(n)))
        .ok_or_else(|| out_of_range("periodic_rate"))?;
    let growth = factor - Decimal::ONE;
    // (1+r)^n rounds to exactly one for vanishingly small rates.
    if growth.is_zero() {
        return Ok(principal / count);
    }
    factor
        .checked_div(growth)
        .and_then(|annuity| annuity.checked_mul(periodic_rate))
        .and_then(|annuity| principal.checked_mul(annuity))
        .ok_or_else(|| out_of_range("principal"))
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

pub(crate) fn periodic_rate(annual_rate_percent: Rate, payments_per_year: u32) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(payments_per_year)
}

/// Payment for the selected frequency. Accelerated variants split the
/// monthly-equivalent payment across their periods.
pub(crate) fn payment_for(
    principal: Money,
    annual_rate_percent: Rate,
    period: AmortizationPeriod,
    frequency: PaymentFrequency,
) -> MortgageResult<Money> {
    let ppy = frequency.payments_per_year();
    if frequency.is_accelerated() {
        let monthly = level_payment(
            principal,
            periodic_rate(annual_rate_percent, MONTHS_PER_YEAR),
            period.years() * MONTHS_PER_YEAR,
        )?;
        monthly
            .checked_mul(Decimal::from(MONTHS_PER_YEAR))
            .map(|annual| annual / Decimal::from(ppy))
            .ok_or_else(|| out_of_range("principal"))
    } else {
        level_payment(
            principal,
            periodic_rate(annual_rate_percent, ppy),
            period.payment_count(frequency),
        )
    }
}

pub(crate) fn amortize(
    principal: Money,
    annual_rate_percent: Rate,
    period: AmortizationPeriod,
    frequency: PaymentFrequency,
) -> MortgageResult<AmortizationOutput> {
    let rate = periodic_rate(annual_rate_percent, frequency.payments_per_year());
    let n = period.payment_count(frequency);
    let payment = payment_for(principal, annual_rate_percent, period, frequency)?;
    let total_interest = payment
        .checked_mul(Decimal::from(n))
        .and_then(|total_paid| total_paid.checked_sub(principal))
        .ok_or_else(|| out_of_range("principal"))?;

    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;

    // No early exit and no clamping: the final balance keeps whatever drift
    // the fixed payment leaves behind.
    for payment_number in 1..=n {
        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| out_of_range("principal"))?;
        let principal_portion = payment - interest;
        balance -= principal_portion;
        cumulative_interest += interest;

        schedule.push(AmortizationEntry {
            payment_number,
            payment,
            principal: principal_portion,
            interest,
            remaining_balance: balance,
            cumulative_interest,
        });
    }

    Ok(AmortizationOutput {
        periodic_payment: payment,
        total_interest,
        periodic_rate: rate,
        number_of_payments: n,
        schedule,
    })
}

fn out_of_range(field: &str) -> MortgageError {
    MortgageError::InvalidInput {
        field: field.into(),
        reason: "Amount is too large to amortize".into(),
    }
}

fn check_arguments(principal: Money, annual_rate_percent: Rate) -> MortgageResult<()> {
    if principal < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if annual_rate_percent > MAX_ANNUAL_RATE_PERCENT {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: format!("Interest rate cannot exceed {MAX_ANNUAL_RATE_PERCENT}%"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Decimal = dec!(0.01);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn years(y: u32) -> AmortizationPeriod {
        AmortizationPeriod::try_from(y).unwrap()
    }

    #[test]
    fn test_monthly_payment_known_value() {
        // 320k at 5% over 25 years, monthly
        let out = compute_amortization(
            dec!(320_000),
            dec!(5),
            years(25),
            PaymentFrequency::Monthly,
        )
        .unwrap();
        assert_close(out.periodic_payment, dec!(1870.69), TOL, "monthly payment");
        assert_eq!(out.number_of_payments, 300);
        assert_eq!(out.schedule.len(), 300);
    }

    #[test]
    fn test_total_interest_formula() {
        let out = compute_amortization(
            dec!(320_000),
            dec!(5),
            years(25),
            PaymentFrequency::Monthly,
        )
        .unwrap();
        assert_eq!(
            out.total_interest,
            out.periodic_payment * dec!(300) - dec!(320_000)
        );
        assert_close(out.total_interest, dec!(241_206.44), dec!(0.5), "total interest");
    }

    #[test]
    fn test_periodic_rate_uses_payments_per_year() {
        let out = compute_amortization(
            dec!(100_000),
            dec!(5.2),
            years(10),
            PaymentFrequency::Weekly,
        )
        .unwrap();
        assert_eq!(out.periodic_rate, dec!(0.001));
        assert_eq!(out.number_of_payments, 520);
    }

    #[test]
    fn test_zero_rate_equal_instalments() {
        let out = compute_amortization(
            dec!(120_000),
            Decimal::ZERO,
            years(10),
            PaymentFrequency::Monthly,
        )
        .unwrap();
        assert_eq!(out.periodic_payment, dec!(1_000));
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert_eq!(out.schedule.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_plain_biweekly_is_not_adjusted() {
        let principal = dec!(320_000);
        let out = compute_amortization(principal, dec!(5), years(25), PaymentFrequency::Biweekly)
            .unwrap();
        let direct = level_payment(principal, dec!(0.05) / dec!(26), 650).unwrap();
        assert_eq!(out.periodic_payment, direct);
        assert_close(
            out.schedule.last().unwrap().remaining_balance,
            Decimal::ZERO,
            TOL,
            "biweekly pays off exactly",
        );
    }

    #[test]
    fn test_accelerated_biweekly_is_monthly_times_12_over_26() {
        let principal = dec!(320_000);
        let monthly =
            periodic_payment(principal, dec!(5), years(25), PaymentFrequency::Monthly).unwrap();
        let accelerated = periodic_payment(
            principal,
            dec!(5),
            years(25),
            PaymentFrequency::AcceleratedBiweekly,
        )
        .unwrap();
        assert_eq!(accelerated, monthly * dec!(12) / dec!(26));
        assert_close(accelerated, dec!(863.39), TOL, "accelerated biweekly");
    }

    #[test]
    fn test_accelerated_weekly_is_monthly_times_12_over_52() {
        let principal = dec!(320_000);
        let monthly =
            periodic_payment(principal, dec!(5), years(25), PaymentFrequency::Monthly).unwrap();
        let accelerated = periodic_payment(
            principal,
            dec!(5),
            years(25),
            PaymentFrequency::AcceleratedWeekly,
        )
        .unwrap();
        assert_eq!(accelerated, monthly * dec!(12) / dec!(52));
    }

    #[test]
    fn test_accelerated_keeps_payment_count_and_overpays() {
        let out = compute_amortization(
            dec!(320_000),
            dec!(5),
            years(25),
            PaymentFrequency::AcceleratedBiweekly,
        )
        .unwrap();
        assert_eq!(out.schedule.len(), 650);
        // Paying slightly more than the biweekly annuity leaves a negative
        // final balance that is not corrected.
        assert!(out.schedule.last().unwrap().remaining_balance < Decimal::ZERO);
    }

    #[test]
    fn test_schedule_entries_are_consistent() {
        let out = compute_amortization(
            dec!(250_000),
            dec!(6.5),
            years(15),
            PaymentFrequency::Monthly,
        )
        .unwrap();

        let mut previous_balance = dec!(250_000);
        let mut interest_sum = Decimal::ZERO;
        for (idx, entry) in out.schedule.iter().enumerate() {
            assert_eq!(entry.payment_number as usize, idx + 1);
            assert_close(
                entry.principal + entry.interest,
                entry.payment,
                dec!(0.0000001),
                "principal + interest",
            );
            assert!(entry.remaining_balance <= previous_balance);
            interest_sum += entry.interest;
            assert_eq!(entry.cumulative_interest, interest_sum);
            previous_balance = entry.remaining_balance;
        }
    }

    #[test]
    fn test_first_entry_interest() {
        let out = compute_amortization(
            dec!(320_000),
            dec!(6),
            years(25),
            PaymentFrequency::Monthly,
        )
        .unwrap();
        // 320,000 * 0.005
        assert_eq!(out.schedule[0].interest, dec!(1_600));
    }

    #[test]
    fn test_zero_principal() {
        let out = compute_amortization(
            Decimal::ZERO,
            dec!(5),
            years(5),
            PaymentFrequency::Monthly,
        )
        .unwrap();
        assert_eq!(out.periodic_payment, Decimal::ZERO);
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert_eq!(out.schedule.len(), 60);
    }

    #[test]
    fn test_validation_negative_principal() {
        let result = compute_amortization(
            dec!(-1),
            dec!(5),
            years(25),
            PaymentFrequency::Monthly,
        );
        assert!(matches!(
            result,
            Err(MortgageError::InvalidInput { ref field, .. }) if field == "principal"
        ));
    }

    #[test]
    fn test_validation_rate_out_of_range() {
        assert!(periodic_payment(dec!(1), dec!(-0.5), years(5), PaymentFrequency::Monthly).is_err());
        assert!(periodic_payment(dec!(1), dec!(101), years(5), PaymentFrequency::Monthly).is_err());
    }

    #[test]
    fn test_level_payment_zero_periods() {
        assert_eq!(level_payment(dec!(500), dec!(0.01), 0).unwrap(), dec!(500));
    }

    #[test]
    fn test_large_principal_at_ceiling_rate_does_not_overflow() {
        // principal * r * (1+r)^n alone would exceed Decimal range here
        let out = compute_amortization(
            dec!(1_000_000_000_000_000_000),
            dec!(100),
            years(30),
            PaymentFrequency::Weekly,
        )
        .unwrap();
        assert_eq!(out.schedule.len(), 1560);
        assert!(out.periodic_payment > Decimal::ZERO);
        assert!(out.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_principal_beyond_decimal_range_is_invalid_input() {
        for frequency in PaymentFrequency::ALL {
            let result = compute_amortization(Decimal::MAX, dec!(100), years(30), frequency);
            assert!(
                matches!(
                    result,
                    Err(MortgageError::InvalidInput { ref field, .. }) if field == "principal"
                ),
                "{frequency}: expected InvalidInput, got {result:?}"
            );
        }
    }

    #[test]
    fn test_level_payment_reports_overflow() {
        assert!(level_payment(Decimal::MAX, dec!(0.5), 360).is_err());
        assert!(level_payment(Decimal::MAX, Decimal::ZERO, 360).is_ok());
    }
}
