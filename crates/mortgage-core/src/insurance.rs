//! Mortgage default insurance.
//!
//! Loans with less than 20% down carry a one-off premium sized from the
//! loan-to-value ratio and a rate tier keyed on the down payment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Down payments at or above this percent need no insurance.
pub const INSURANCE_THRESHOLD_PERCENT: Rate = dec!(20);

const TIER_15_TO_20: Rate = dec!(0.028);
const TIER_10_TO_15: Rate = dec!(0.031);
const TIER_BELOW_10: Rate = dec!(0.040);

/// Premium rate for a down payment percent, or `None` when uninsured.
///
/// Anything under 10% falls into the 4.0% tier, including values below the
/// validation minimum.
pub fn insurance_rate(down_payment_percent: Rate) -> Option<Rate> {
    if down_payment_percent >= INSURANCE_THRESHOLD_PERCENT {
        None
    } else if down_payment_percent >= dec!(15) {
        Some(TIER_15_TO_20)
    } else if down_payment_percent >= dec!(10) {
        Some(TIER_10_TO_15)
    } else {
        Some(TIER_BELOW_10)
    }
}

/// Loan-to-value as a fraction (0.9 for 10% down).
pub fn loan_to_value(down_payment_percent: Rate) -> Rate {
    dec!(100).saturating_sub(down_payment_percent) / dec!(100)
}

/// `price * LTV * tier rate`, or zero with 20% or more down.
///
/// Inputs whose premium falls outside Decimal range are `InvalidInput`.
pub fn calculate_insurance_premium(price: Money, down_payment_percent: Rate) -> MortgageResult<Money> {
    let Some(rate) = insurance_rate(down_payment_percent) else {
        return Ok(Decimal::ZERO);
    };
    dec!(100)
        .checked_sub(down_payment_percent)
        .map(|financed| financed / dec!(100))
        .and_then(|ltv| ltv.checked_mul(rate))
        .and_then(|factor| price.checked_mul(factor))
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "price".into(),
            reason: format!(
                "Premium for {price} at {down_payment_percent}% down is out of range"
            ),
        })
}
