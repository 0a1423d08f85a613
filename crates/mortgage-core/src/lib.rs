pub mod amortization;
pub mod error;
pub mod export;
pub mod insurance;
pub mod pricing;
pub mod scenarios;
pub mod types;
pub mod validation;

pub use amortization::{compute_amortization, periodic_payment, AmortizationEntry, AmortizationOutput};
pub use error::{MortgageError, ValidationError};
pub use insurance::calculate_insurance_premium;
pub use pricing::interpret_price;
pub use scenarios::{
    compare_scenarios, run_scenario, stress_test, ScenarioComparison, ScenarioResult,
    StressPoint, StressTestResult,
};
pub use types::*;
pub use validation::{validate, LoanParameters, ValidatedLoan};

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
