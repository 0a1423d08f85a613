use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%) unless a field name says `_percent`.
pub type Rate = Decimal;

/// Terms the amortization picker offers, in whole years.
pub const ALLOWED_AMORTIZATION_YEARS: [u32; 6] = [5, 10, 15, 20, 25, 30];

/// How often a payment is made.
///
/// The accelerated variants pay the monthly-equivalent amount split across
/// more periods; they keep the same payment count as their plain siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Biweekly,
    AcceleratedBiweekly,
    Weekly,
    AcceleratedWeekly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 5] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Biweekly,
        PaymentFrequency::AcceleratedBiweekly,
        PaymentFrequency::Weekly,
        PaymentFrequency::AcceleratedWeekly,
    ];

    pub fn payments_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Biweekly | PaymentFrequency::AcceleratedBiweekly => 26,
            PaymentFrequency::Weekly | PaymentFrequency::AcceleratedWeekly => 52,
        }
    }

    pub fn is_accelerated(self) -> bool {
        matches!(
            self,
            PaymentFrequency::AcceleratedBiweekly | PaymentFrequency::AcceleratedWeekly
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::AcceleratedBiweekly => "accelerated_biweekly",
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::AcceleratedWeekly => "accelerated_weekly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentFrequency {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s
            .trim()
            .to_ascii_lowercase()
            .replace(|c: char| c == '-' || c == ' ', "_");
        PaymentFrequency::ALL
            .into_iter()
            .find(|f| f.label() == normalised)
            .ok_or_else(|| MortgageError::InvalidInput {
                field: "frequency".into(),
                reason: format!(
                    "Unknown payment frequency '{s}' (expected one of: monthly, biweekly, \
                     accelerated_biweekly, weekly, accelerated_weekly)"
                ),
            })
    }
}

/// Amortization term restricted to [`ALLOWED_AMORTIZATION_YEARS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AmortizationPeriod(u32);

impl AmortizationPeriod {
    pub fn years(self) -> u32 {
        self.0
    }

    /// Total number of scheduled payments for the given frequency.
    pub fn payment_count(self, frequency: PaymentFrequency) -> u32 {
        self.0 * frequency.payments_per_year()
    }
}

impl Default for AmortizationPeriod {
    fn default() -> Self {
        AmortizationPeriod(25)
    }
}

impl TryFrom<u32> for AmortizationPeriod {
    type Error = MortgageError;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        if ALLOWED_AMORTIZATION_YEARS.contains(&years) {
            Ok(AmortizationPeriod(years))
        } else {
            Err(MortgageError::InvalidInput {
                field: "amortization_years".into(),
                reason: format!(
                    "Amortization must be one of {ALLOWED_AMORTIZATION_YEARS:?} years, got {years}"
                ),
            })
        }
    }
}

impl From<AmortizationPeriod> for u32 {
    fn from(period: AmortizationPeriod) -> Self {
        period.0
    }
}

impl FromStr for AmortizationPeriod {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let years: u32 = s.trim().parse().map_err(|_| MortgageError::InvalidInput {
            field: "amortization_years".into(),
            reason: format!("'{s}' is not a whole number of years"),
        })?;
        AmortizationPeriod::try_from(years)
    }
}

impl fmt::Display for AmortizationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years", self.0)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
