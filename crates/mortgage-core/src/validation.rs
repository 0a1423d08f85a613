use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::pricing::{interpret_price, parse_decimal};
use crate::types::{AmortizationPeriod, Money, PaymentFrequency, Rate};

pub const MIN_PRICE: Money = dec!(10_000);
pub const MAX_PRICE: Money = dec!(100_000_000);

/// Prices at or above this need the larger minimum down payment.
pub const HIGH_VALUE_PRICE: Money = dec!(1_000_000);
pub const MIN_DOWN_PAYMENT_PERCENT: Rate = dec!(5);
pub const MIN_DOWN_PAYMENT_PERCENT_HIGH_VALUE: Rate = dec!(20);

/// Exclusive upper bound on the annual interest rate, in percent.
pub const MAX_INTEREST_RATE_PERCENT: Rate = dec!(30);

/// Loan parameters as entered by the user, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Raw price text, interpreted with [`interpret_price`].
    pub property_price: String,
    pub down_payment_percent: String,
    /// Annual nominal rate in percent (e.g. "5" = 5%).
    pub interest_rate_percent: String,
    /// Annual property tax as a percent of price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_tax_rate_percent: Option<String>,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    #[serde(default, rename = "amortization_years")]
    pub amortization: AmortizationPeriod,
}

/// A parameter set that has passed [`validate`]. Every numeric field is a
/// finite decimal inside its allowed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedLoan {
    pub price: Money,
    pub down_payment_percent: Rate,
    pub interest_rate_percent: Rate,
    pub property_tax_rate_percent: Option<Rate>,
    pub frequency: PaymentFrequency,
    pub amortization: AmortizationPeriod,
}

/// Minimum down payment in percent for a given price.
pub fn minimum_down_payment_percent(price: Money) -> Rate {
    if price >= HIGH_VALUE_PRICE {
        MIN_DOWN_PAYMENT_PERCENT_HIGH_VALUE
    } else {
        MIN_DOWN_PAYMENT_PERCENT
    }
}

/// Check a parameter set. Rules run in order: price, down payment, interest
/// rate, property tax. The first failure is returned.
pub fn validate(params: &LoanParameters) -> Result<ValidatedLoan, ValidationError> {
    let price = validate_price(&params.property_price)?;
    let down_payment_percent = validate_down_payment(&params.down_payment_percent, price)?;
    let interest_rate_percent = validate_interest_rate(&params.interest_rate_percent)?;
    let property_tax_rate_percent =
        validate_property_tax(params.property_tax_rate_percent.as_deref())?;

    Ok(ValidatedLoan {
        price,
        down_payment_percent,
        interest_rate_percent,
        property_tax_rate_percent,
        frequency: params.frequency,
        amortization: params.amortization,
    })
}

fn validate_price(raw: &str) -> Result<Money, ValidationError> {
    let price = interpret_price(raw);
    if price < MIN_PRICE {
        return Err(ValidationError::InvalidPrice(format!(
            "Price must be at least {MIN_PRICE} (interpreted '{}' as {price})",
            raw.trim()
        )));
    }
    if price > MAX_PRICE {
        return Err(ValidationError::InvalidPrice(format!(
            "Price must not exceed {MAX_PRICE} (interpreted '{}' as {price})",
            raw.trim()
        )));
    }
    Ok(price)
}

fn validate_down_payment(raw: &str, price: Money) -> Result<Rate, ValidationError> {
    let percent = parse_decimal(raw).ok_or_else(|| {
        ValidationError::InvalidDownPayment(format!(
            "Down payment '{}' is not a number",
            raw.trim()
        ))
    })?;

    let minimum = minimum_down_payment_percent(price);
    if percent < minimum {
        return Err(ValidationError::InvalidDownPayment(format!(
            "Minimum down payment for a price of {price} is {minimum}%"
        )));
    }
    if percent > dec!(100) {
        return Err(ValidationError::InvalidDownPayment(
            "Down payment cannot exceed 100% of the price".into(),
        ));
    }
    Ok(percent)
}

fn validate_interest_rate(raw: &str) -> Result<Rate, ValidationError> {
    let rate = parse_decimal(raw).ok_or_else(|| {
        ValidationError::InvalidInterestRate(format!(
            "Interest rate '{}' is not a number",
            raw.trim()
        ))
    })?;

    if rate <= Decimal::ZERO || rate >= MAX_INTEREST_RATE_PERCENT {
        return Err(ValidationError::InvalidInterestRate(format!(
            "Interest rate must be greater than 0% and less than {MAX_INTEREST_RATE_PERCENT}%, got {rate}%"
        )));
    }
    Ok(rate)
}

fn validate_property_tax(raw: Option<&str>) -> Result<Option<Rate>, ValidationError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };

    let rate = parse_decimal(raw).ok_or_else(|| {
        ValidationError::InvalidPropertyTax(format!(
            "Property tax rate '{}' is not a number",
            raw.trim()
        ))
    })?;

    if rate < Decimal::ZERO || rate >= dec!(100) {
        return Err(ValidationError::InvalidPropertyTax(format!(
            "Property tax rate must be between 0% and 100%, got {rate}%"
        )));
    }
    Ok(Some(rate))
}
