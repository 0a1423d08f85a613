use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected loan parameter set. Exactly one reason is reported: the first
/// rule that fails.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason")]
pub enum ValidationError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid down payment: {0}")]
    InvalidDownPayment(String),

    #[error("Invalid interest rate: {0}")]
    InvalidInterestRate(String),

    #[error("Invalid property tax rate: {0}")]
    InvalidPropertyTax(String),
}

impl ValidationError {
    pub fn reason(&self) -> &str {
        match self {
            ValidationError::InvalidPrice(r)
            | ValidationError::InvalidDownPayment(r)
            | ValidationError::InvalidInterestRate(r)
            | ValidationError::InvalidPropertyTax(r) => r,
        }
    }
}

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Scenario {label}: {source}")]
    ScenarioFailed {
        label: String,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "export")]
impl From<csv::Error> for MortgageError {
    fn from(e: csv::Error) -> Self {
        MortgageError::Export(e.to_string())
    }
}
