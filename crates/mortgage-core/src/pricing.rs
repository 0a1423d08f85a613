//! Price entry shorthand.
//!
//! Buyers type prices in whatever shorthand is quickest: "450" for $450k,
//! "1.2" for $1.2M, or the full figure. [`interpret_price`] turns the raw
//! text into the amount the rest of the engine works with.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::Money;
use crate::MortgageResult;

/// Entries below this are read as shorthand.
const SHORTHAND_CEILING: Decimal = dec!(1_000);

/// Whole-number entries from here up to the ceiling are thousands.
const THOUSANDS_FLOOR: Decimal = dec!(100);

const THOUSAND: Decimal = dec!(1_000);
const MILLION: Decimal = dec!(1_000_000);

/// Interpret a raw price string as a currency amount.
///
/// - unparseable input → 0
/// - below 1,000 with a decimal point → millions (`"450.5"` → 450,500,000)
/// - below 1,000, whole, at least 100 → thousands (`"450"` → 450,000)
/// - anything else is taken literally
pub fn interpret_price(raw: &str) -> Money {
    let Some(value) = parse_decimal(raw) else {
        return Decimal::ZERO;
    };

    if value >= SHORTHAND_CEILING {
        return value;
    }

    let scaled = if raw.contains('.') {
        value.checked_mul(MILLION)
    } else if value >= THOUSANDS_FLOOR {
        value.checked_mul(THOUSAND)
    } else {
        Some(value)
    };
    scaled.unwrap_or(Decimal::ZERO)
}

/// Parse a user-entered number, accepting plain and scientific notation.
/// Returns `None` for blank or non-numeric text.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// [`parse_decimal`] for a named argument, as an `InvalidInput` error when
/// the text is not a number.
pub fn parse_field(field: &str, raw: &str) -> MortgageResult<Decimal> {
    parse_decimal(raw).ok_or_else(|| MortgageError::InvalidInput {
        field: field.into(),
        reason: format!("'{}' is not a number", raw.trim()),
    })
}
