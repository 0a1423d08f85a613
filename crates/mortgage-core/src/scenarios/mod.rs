//! Scenario orchestration: single runs, A/B comparison and rate stress tests.

pub mod scenario;
pub mod stress;

pub use scenario::{compare_scenarios, run_scenario, ScenarioComparison, ScenarioResult};
pub use stress::{stress_test, StressPoint, StressTestResult, STRESS_SHOCKS_PERCENT};
