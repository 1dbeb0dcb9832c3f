//! Memoized report computation keyed on the input snapshot.

use std::rc::Rc;

use tracing::debug;

use super::report::CostReport;
use super::types::{AnalysisParams, EnergyInput, InputSnapshot};

/// Bit-exact cache key for a snapshot and its analysis parameters.
///
/// Floats are compared by bit pattern, so `0.0` and `-0.0` are distinct keys
/// and a NaN input still hits its own cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotKey([u64; 10]);

impl SnapshotKey {
    /// Builds the key for `snapshot` under `params`.
    pub fn new(snapshot: &InputSnapshot, params: &AnalysisParams) -> Self {
        let [e0, e1, e2, e3] = input_bits(&snapshot.electric);
        let [f0, f1, f2, f3] = input_bits(&snapshot.fuel);
        Self([
            e0,
            e1,
            e2,
            e3,
            f0,
            f1,
            f2,
            f3,
            params.annual_distance_km.to_bits(),
            params.decision_epsilon.to_bits(),
        ])
    }
}

fn input_bits(input: &EnergyInput) -> [u64; 4] {
    match *input {
        EnergyInput::SpendDistance {
            spend,
            distance_km,
            unit_price,
        } => [0, spend.to_bits(), distance_km.to_bits(), unit_price.to_bits()],
        EnergyInput::RatePrice {
            rate_per_100km,
            unit_price,
        } => [1, rate_per_100km.to_bits(), unit_price.to_bits(), 0],
    }
}

/// Recomputes the report only when the inputs change.
///
/// Holds the most recent result, the same contract as a reactive
/// derived value: repeated calls with an unchanged snapshot return the
/// cached report.
#[derive(Debug, Default)]
pub struct Calculator {
    last: Option<(SnapshotKey, Rc<CostReport>)>,
    recomputations: usize,
}

impl Calculator {
    /// Creates an empty calculator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the report for `snapshot`, recomputing only on a key change.
    pub fn report(&mut self, snapshot: &InputSnapshot, params: &AnalysisParams) -> Rc<CostReport> {
        let key = SnapshotKey::new(snapshot, params);
        if let Some((cached_key, report)) = &self.last
            && *cached_key == key
        {
            return Rc::clone(report);
        }
        debug!(?snapshot, "recomputing cost report");
        let report = Rc::new(CostReport::from_snapshot(snapshot, params));
        self.recomputations += 1;
        self.last = Some((key, Rc::clone(&report)));
        report
    }

    /// Number of times a report was actually derived.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_snapshot_hits_cache() {
        let mut calc = Calculator::new();
        let snap = InputSnapshot::from_rates(2.1, 27.62, 7.0, 7.0);
        let params = AnalysisParams::default();
        let first = calc.report(&snap, &params);
        let second = calc.report(&snap, &params);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(calc.recomputations(), 1);
    }

    #[test]
    fn changed_snapshot_recomputes() {
        let mut calc = Calculator::new();
        let params = AnalysisParams::default();
        let a = calc.report(&InputSnapshot::from_rates(2.1, 27.62, 7.0, 7.0), &params);
        let b = calc.report(&InputSnapshot::from_rates(1.0, 27.62, 7.0, 7.0), &params);
        assert_eq!(calc.recomputations(), 2);
        assert!(b.result.electric_cost_per_km < a.result.electric_cost_per_km);
    }

    #[test]
    fn params_are_part_of_key() {
        let mut calc = Calculator::new();
        let snap = InputSnapshot::from_rates(2.1, 27.62, 7.0, 7.0);
        calc.report(&snap, &AnalysisParams::default());
        let params = AnalysisParams {
            annual_distance_km: 20_000.0,
            ..AnalysisParams::default()
        };
        calc.report(&snap, &params);
        assert_eq!(calc.recomputations(), 2);
    }

    #[test]
    fn mode_is_part_of_key() {
        let rate = EnergyInput::RatePrice {
            rate_per_100km: 5.0,
            unit_price: 5.0,
        };
        let spend = EnergyInput::SpendDistance {
            spend: 5.0,
            distance_km: 5.0,
            unit_price: 0.0,
        };
        assert_ne!(input_bits(&rate), input_bits(&spend));
    }
}
