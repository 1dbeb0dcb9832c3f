//! Derivation engine: pure functions from inputs to costs, decisions and
//! chart series.

/// Break-even price calculation.
pub mod breakeven;
pub mod decision;
/// Snapshot-keyed memoization of reports.
pub mod memo;
pub mod normalize;
pub mod report;
/// Sensitivity matrix over simultaneous price offsets.
pub mod sensitivity;
pub mod sweep;
pub mod types;

pub use decision::{Decision, Recommendation};
pub use memo::Calculator;
pub use report::CostReport;
pub use types::{AnalysisParams, EnergyInput, EnergySource, InputSnapshot};
