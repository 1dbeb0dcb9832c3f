//! Shared test fixtures for integration tests.

use dualfuel_cost::calc::{AnalysisParams, CostReport, InputSnapshot};

/// Rated consumption worked example: 27.62 kWh/100km at 2.1, 7 L/100km at 7.0.
pub fn rated_snapshot() -> InputSnapshot {
    InputSnapshot::from_rates(2.1, 27.62, 7.0, 7.0)
}

/// Report for [`rated_snapshot`] with default analysis parameters.
pub fn rated_report() -> CostReport {
    CostReport::from_snapshot(&rated_snapshot(), &AnalysisParams::default())
}

/// Asserts two floats agree to within `tol`.
pub fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: expected {expected}, got {actual} (tol {tol})"
    );
}
