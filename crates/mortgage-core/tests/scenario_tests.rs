use mortgage_core::amortization::level_payment;
use mortgage_core::export::{schedule_to_csv, yearly_summary};
use mortgage_core::{
    calculate_insurance_premium, compare_scenarios, compute_amortization, interpret_price,
    run_scenario, stress_test, validate, AmortizationPeriod, LoanParameters, MortgageError,
    PaymentFrequency, ValidationError,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(price: &str, down: &str, rate: &str, frequency: PaymentFrequency) -> LoanParameters {
    LoanParameters {
        property_price: price.into(),
        down_payment_percent: down.into(),
        interest_rate_percent: rate.into(),
        property_tax_rate_percent: None,
        frequency,
        amortization: AmortizationPeriod::try_from(25).unwrap(),
    }
}

// ===========================================================================
// Price interpretation
// ===========================================================================

#[test]
fn test_price_shorthand_examples() {
    assert_eq!(interpret_price("450"), dec!(450_000));
    assert_eq!(interpret_price("450.5"), dec!(450_500_000));
    assert_eq!(interpret_price("450000"), dec!(450_000));
    assert_eq!(interpret_price("abc"), Decimal::ZERO);
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_validation_examples() {
    let m = PaymentFrequency::Monthly;

    assert!(matches!(
        validate(&loan("5000", "20", "5", m)),
        Err(ValidationError::InvalidPrice(_))
    ));
    assert!(matches!(
        validate(&loan("500000", "4", "5", m)),
        Err(ValidationError::InvalidDownPayment(_))
    ));
    assert!(matches!(
        validate(&loan("1500000", "15", "5", m)),
        Err(ValidationError::InvalidDownPayment(_))
    ));
    assert!(matches!(
        validate(&loan("500000", "20", "31", m)),
        Err(ValidationError::InvalidInterestRate(_))
    ));
}

#[test]
fn test_validation_error_serialises_with_kind() {
    let err = validate(&loan("5000", "20", "5", PaymentFrequency::Monthly)).unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "InvalidPrice");
    assert!(json["reason"].as_str().unwrap().contains("10000"));
}

// ===========================================================================
// Insurance
// ===========================================================================

#[test]
fn test_insurance_example() {
    assert_eq!(
        calculate_insurance_premium(dec!(500_000), dec!(10)).unwrap(),
        dec!(13_950)
    );
}

// ===========================================================================
// End to end
// ===========================================================================

#[test]
fn test_end_to_end_monthly_payment() {
    let out = run_scenario(&loan("400000", "20", "5", PaymentFrequency::Monthly)).unwrap();

    assert_eq!(out.principal, dec!(320_000));
    assert_eq!(out.schedule.len(), 300);
    assert!((out.periodic_payment - dec!(1871.51)).abs() <= dec!(1.0));
    assert_eq!(
        out.total_interest,
        out.periodic_payment * dec!(300) - dec!(320_000)
    );
}

#[test]
fn test_accelerated_biweekly_against_direct_monthly() {
    let out = run_scenario(&loan(
        "400000",
        "20",
        "5",
        PaymentFrequency::AcceleratedBiweekly,
    ))
    .unwrap();

    let monthly = level_payment(dec!(320_000), dec!(0.05) / dec!(12), 300).unwrap();
    assert_eq!(out.periodic_payment, monthly * dec!(12) / dec!(26));
    assert_eq!(out.schedule.len(), 650);
}

#[test]
fn test_cumulative_interest_matches_column_sum() {
    for frequency in PaymentFrequency::ALL {
        let out = run_scenario(&loan("650", "12", "4.79", frequency)).unwrap();
        let sum: Decimal = out.schedule.iter().map(|e| e.interest).sum();
        let last = out.schedule.last().unwrap();
        assert!(
            (last.cumulative_interest - sum).abs() <= dec!(0.000001),
            "{frequency}: cumulative {} vs sum {}",
            last.cumulative_interest,
            sum
        );
    }
}

#[test]
fn test_run_scenario_is_bit_identical() {
    let params = loan("1.25", "25", "6.1", PaymentFrequency::Weekly);
    let first = run_scenario(&params).unwrap();
    let second = run_scenario(&params).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_zero_rate_guard_in_engine() {
    let out = compute_amortization(
        dec!(300_000),
        Decimal::ZERO,
        AmortizationPeriod::try_from(25).unwrap(),
        PaymentFrequency::Monthly,
    )
    .unwrap();
    assert_eq!(out.periodic_payment, dec!(1_000));
}

// ===========================================================================
// Comparison and stress test
// ===========================================================================

#[test]
fn test_comparison_runs_independently() {
    let a = loan("400000", "20", "5", PaymentFrequency::Monthly);
    let b = loan("400000", "10", "5", PaymentFrequency::AcceleratedBiweekly);

    let cmp = compare_scenarios(&a, &b).unwrap();
    assert_eq!(cmp.scenario_a, run_scenario(&a).unwrap());
    assert_eq!(cmp.scenario_b, run_scenario(&b).unwrap());
    // 400,000 * 0.9 * 0.031
    assert_eq!(cmp.insurance_premium_difference, dec!(11_160));
}

#[test]
fn test_comparison_failure_is_labelled() {
    let a = loan("400000", "2", "5", PaymentFrequency::Monthly);
    let b = loan("400000", "20", "5", PaymentFrequency::Monthly);
    let err = compare_scenarios(&a, &b).unwrap_err();
    assert!(matches!(err, MortgageError::ScenarioFailed { ref label, .. } if label == "A"));
    assert!(err.to_string().starts_with("Scenario A:"));
}

#[test]
fn test_stress_test_points() {
    let out = stress_test(&loan("400000", "20", "5", PaymentFrequency::Monthly)).unwrap();
    assert_eq!(out.points.len(), 3);
    let shocks: Vec<Decimal> = out.points.iter().map(|p| p.rate_shock_percent).collect();
    assert_eq!(shocks, vec![dec!(0), dec!(2), dec!(5)]);
    assert!(out.points[0].periodic_payment < out.points[1].periodic_payment);
    assert!(out.points[1].periodic_payment < out.points[2].periodic_payment);
}

// ===========================================================================
// Export
// ===========================================================================

#[test]
fn test_export_and_yearly_summary() {
    let out = run_scenario(&loan("400000", "20", "5", PaymentFrequency::Weekly)).unwrap();

    let csv = schedule_to_csv(&out.schedule).unwrap();
    assert_eq!(csv.lines().count(), 1 + 1300);

    let years = yearly_summary(&out.schedule, out.payments_per_year);
    assert_eq!(years.len(), 25);
    assert_eq!(
        years.last().unwrap().cumulative_interest,
        out.schedule.last().unwrap().cumulative_interest
    );
}
