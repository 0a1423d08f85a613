//! Schedule export: CSV rows and per-year aggregates for chart feeds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationEntry;
use crate::types::Money;

#[cfg(feature = "export")]
use crate::MortgageResult;

/// Column order of the exported schedule.
pub const CSV_HEADER: [&str; 5] = [
    "payment_number",
    "principal_paid",
    "interest_paid",
    "remaining_balance",
    "cumulative_interest",
];

/// Totals for one year of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    /// 1-indexed.
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
}

/// Group a schedule into years of `payments_per_year` entries. A trailing
/// partial year is kept.
pub fn yearly_summary(schedule: &[AmortizationEntry], payments_per_year: u32) -> Vec<YearSummary> {
    if payments_per_year == 0 {
        return Vec::new();
    }

    schedule
        .chunks(payments_per_year as usize)
        .zip(1u32..)
        .filter_map(|(entries, year)| {
            let last = entries.last()?;
            let (principal_paid, interest_paid) = entries
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(p, i), e| {
                    (p + e.principal, i + e.interest)
                });
            Some(YearSummary {
                year,
                principal_paid,
                interest_paid,
                ending_balance: last.remaining_balance,
                cumulative_interest: last.cumulative_interest,
            })
        })
        .collect()
}

/// Write the schedule as CSV, header first, one row per payment.
/// Amounts are plain decimals rounded to cents.
#[cfg(feature = "export")]
pub fn write_schedule_csv<W: std::io::Write>(
    schedule: &[AmortizationEntry],
    writer: W,
) -> MortgageResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for entry in schedule {
        wtr.write_record([
            entry.payment_number.to_string(),
            cents(entry.principal),
            cents(entry.interest),
            cents(entry.remaining_balance),
            cents(entry.cumulative_interest),
        ])?;
    }
    wtr.flush()
        .map_err(|e| crate::error::MortgageError::Export(e.to_string()))?;
    Ok(())
}

/// Render the schedule CSV into a string.
#[cfg(feature = "export")]
pub fn schedule_to_csv(schedule: &[AmortizationEntry]) -> MortgageResult<String> {
    let mut buf = Vec::new();
    write_schedule_csv(schedule, &mut buf)?;
    String::from_utf8(buf).map_err(|e| crate::error::MortgageError::Export(e.to_string()))
}

#[cfg(feature = "export")]
fn cents(value: Money) -> String {
    let rounded = value.round_dp(2);
    if rounded.is_zero() {
        "0.00".to_string()
    } else {
        format!("{rounded:.2}")
    }
}
