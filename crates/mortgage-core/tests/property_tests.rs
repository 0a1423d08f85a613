use mortgage_core::{run_scenario, AmortizationPeriod, LoanParameters, PaymentFrequency};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn frequency_strategy() -> impl Strategy<Value = PaymentFrequency> {
    prop::sample::select(PaymentFrequency::ALL.to_vec())
}

fn period_strategy() -> impl Strategy<Value = AmortizationPeriod> {
    prop::sample::select(vec![5u32, 10, 15, 20, 25, 30])
        .prop_map(|y| AmortizationPeriod::try_from(y).unwrap())
}

/// Parameter sets that always pass validation: prices under the high-value
/// threshold with at least 5% down, rates in (0, 30).
fn valid_loan_strategy() -> impl Strategy<Value = LoanParameters> {
    (
        10_000u32..=999_999,
        5u32..=100,
        1u32..=2_999,
        frequency_strategy(),
        period_strategy(),
    )
        .prop_map(|(price, down, rate_bp, frequency, amortization)| LoanParameters {
            property_price: price.to_string(),
            down_payment_percent: down.to_string(),
            interest_rate_percent: (Decimal::from(rate_bp) / dec!(100)).to_string(),
            property_tax_rate_percent: None,
            frequency,
            amortization,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// The schedule always has years * payments_per_year entries.
    #[test]
    fn prop_schedule_length(params in valid_loan_strategy()) {
        let out = run_scenario(&params).unwrap();
        let expected = params.amortization.years() * params.frequency.payments_per_year();
        prop_assert_eq!(out.schedule.len() as u32, expected);
        prop_assert_eq!(out.number_of_payments, expected);
    }

    /// Remaining balance never increases from one payment to the next.
    #[test]
    fn prop_balance_non_increasing(params in valid_loan_strategy()) {
        let out = run_scenario(&params).unwrap();
        let mut previous = out.principal;
        for entry in &out.schedule {
            let tol = previous.abs() * dec!(0.000001) + dec!(0.000001);
            prop_assert!(
                entry.remaining_balance <= previous + tol,
                "payment {} balance {} rose above {}",
                entry.payment_number,
                entry.remaining_balance,
                previous
            );
            previous = entry.remaining_balance;
        }
    }

    /// Cumulative interest at the last entry equals the interest column sum.
    #[test]
    fn prop_cumulative_interest_is_sum(params in valid_loan_strategy()) {
        let out = run_scenario(&params).unwrap();
        let sum: Decimal = out.schedule.iter().map(|e| e.interest).sum();
        let last = out.schedule.last().unwrap().cumulative_interest;
        prop_assert!((last - sum).abs() <= dec!(0.000001));
    }

    /// Payment numbers run 1..=n in order.
    #[test]
    fn prop_payment_numbers_ordered(params in valid_loan_strategy()) {
        let out = run_scenario(&params).unwrap();
        for (idx, entry) in out.schedule.iter().enumerate() {
            prop_assert_eq!(entry.payment_number as usize, idx + 1);
        }
    }
}
