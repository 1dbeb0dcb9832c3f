//! Parametric series generators feeding the comparison charts.
//!
//! Generators return lazy iterators that can be cloned and restarted; each
//! point is indexed multiplicatively from the range start so the point count
//! never depends on accumulated rounding.

use serde::Serialize;

use super::breakeven::critical_electric_price;
use super::normalize::cost_per_km_from_rate;
use super::types::{AnalysisParams, EnergyCost};

/// Inclusive parameter range with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRange {
    /// First parameter value.
    pub start: f64,
    /// Last parameter value (inclusive).
    pub end: f64,
    /// Distance between consecutive values (> 0).
    pub step: f64,
}

/// Electricity prices swept for the cost and ratio charts.
pub const ELECTRIC_PRICE_SWEEP: SweepRange = SweepRange {
    start: 0.5,
    end: 5.0,
    step: 0.1,
};

/// Fuel prices swept for the critical-price chart.
pub const FUEL_PRICE_SWEEP: SweepRange = SweepRange {
    start: 5.0,
    end: 12.0,
    step: 0.2,
};

impl SweepRange {
    /// Number of points, `round((end - start) / step) + 1`.
    ///
    /// A degenerate range (non-positive step or `end < start`) yields the
    /// start value only.
    pub fn point_count(&self) -> usize {
        if self.step > 0.0 && self.end >= self.start {
            ((self.end - self.start) / self.step).round() as usize + 1
        } else {
            1
        }
    }

    /// Parameter value at index `i`.
    pub fn value_at(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }

    /// All parameter values in order.
    pub fn values(self) -> impl Iterator<Item = f64> + Clone {
        (0..self.point_count()).map(move |i| self.value_at(i))
    }
}

/// One `(parameter, derived value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Swept parameter value.
    pub param: f64,
    /// Value derived at that parameter.
    pub value: f64,
}

impl SweepPoint {
    /// Axis label for the parameter, one decimal place.
    pub fn label(&self) -> String {
        format!("{:.1}", self.param)
    }
}

/// Named, ordered series of sweep points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSeries {
    /// Series name shown in legends and CSV headers.
    pub name: &'static str,
    /// Points in parameter order.
    pub points: Vec<SweepPoint>,
}

impl SweepSeries {
    /// Collects a generator into a named series.
    pub fn from_points(name: &'static str, points: impl Iterator<Item = SweepPoint>) -> Self {
        Self {
            name,
            points: points.collect(),
        }
    }
}

/// Electric cost per km as the electricity price sweeps over
/// [`ELECTRIC_PRICE_SWEEP`], holding the consumption rate fixed.
pub fn electric_cost_sweep(
    electric_rate_per_100km: f64,
) -> impl Iterator<Item = SweepPoint> + Clone {
    ELECTRIC_PRICE_SWEEP.values().map(move |price| SweepPoint {
        param: price,
        value: cost_per_km_from_rate(electric_rate_per_100km, price),
    })
}

/// Current fuel cost per km repeated at every electricity price, the flat
/// reference line of the cost chart.
pub fn fuel_cost_baseline(fuel_cost_per_km: f64) -> impl Iterator<Item = SweepPoint> + Clone {
    ELECTRIC_PRICE_SWEEP.values().map(move |price| SweepPoint {
        param: price,
        value: fuel_cost_per_km,
    })
}

/// Break-even electricity price as the fuel price sweeps over
/// [`FUEL_PRICE_SWEEP`].
///
/// Fuel cost per km is recomputed at each swept price, so this is a line
/// through the origin rather than a constant. All zeros if the electric
/// rate is 0.
pub fn critical_price_sweep(
    fuel_rate_per_100km: f64,
    electric_rate_per_100km: f64,
) -> impl Iterator<Item = SweepPoint> + Clone {
    FUEL_PRICE_SWEEP.values().map(move |fuel_price| {
        let fuel_cost_per_km = cost_per_km_from_rate(fuel_rate_per_100km, fuel_price);
        SweepPoint {
            param: fuel_price,
            value: critical_electric_price(fuel_cost_per_km, electric_rate_per_100km),
        }
    })
}

/// Ratio of electric to current fuel cost per km across
/// [`ELECTRIC_PRICE_SWEEP`]. All zeros if the fuel cost is 0.
pub fn cost_ratio_sweep(
    electric_rate_per_100km: f64,
    fuel_cost_per_km: f64,
) -> impl Iterator<Item = SweepPoint> + Clone {
    electric_cost_sweep(electric_rate_per_100km).map(move |p| SweepPoint {
        param: p.param,
        value: if fuel_cost_per_km > 0.0 {
            p.value / fuel_cost_per_km
        } else {
            0.0
        },
    })
}

/// Price multiplier pair for one bar of the scenario chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    /// Bar label.
    pub label: &'static str,
    /// Multiplier on the electric cost per km.
    pub electric_multiplier: f64,
    /// Multiplier on the fuel cost per km.
    pub fuel_multiplier: f64,
}

/// Scenarios shown in the annual cost bar chart, in display order.
pub const SCENARIOS: [Scenario; 5] = [
    Scenario {
        label: "current",
        electric_multiplier: 1.0,
        fuel_multiplier: 1.0,
    },
    Scenario {
        label: "elec+50%",
        electric_multiplier: 1.5,
        fuel_multiplier: 1.0,
    },
    Scenario {
        label: "elec+100%",
        electric_multiplier: 2.0,
        fuel_multiplier: 1.0,
    },
    Scenario {
        label: "fuel+30%",
        electric_multiplier: 1.0,
        fuel_multiplier: 1.3,
    },
    Scenario {
        label: "fuel+50%",
        electric_multiplier: 1.0,
        fuel_multiplier: 1.5,
    },
];

/// Annual cost of each source under one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioBar {
    /// Scenario the bar belongs to.
    #[serde(flatten)]
    pub scenario: Scenario,
    /// Annual cost driving electric only.
    pub annual_electric: f64,
    /// Annual cost driving on fuel only.
    pub annual_fuel: f64,
}

/// Annual costs for every entry of [`SCENARIOS`].
pub fn scenario_bars(
    electric_cost_per_km: f64,
    fuel_cost_per_km: f64,
    annual_distance_km: f64,
) -> impl Iterator<Item = ScenarioBar> + Clone {
    SCENARIOS.into_iter().map(move |scenario| ScenarioBar {
        scenario,
        annual_electric: electric_cost_per_km * scenario.electric_multiplier * annual_distance_km,
        annual_fuel: fuel_cost_per_km * scenario.fuel_multiplier * annual_distance_km,
    })
}

/// Every chart series for one input snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Electric cost per km vs electricity price.
    pub electric_cost: SweepSeries,
    /// Flat fuel cost per km over the same prices.
    pub fuel_cost: SweepSeries,
    /// Break-even electricity price vs fuel price.
    pub critical_price: SweepSeries,
    /// Annual cost bars per scenario.
    pub scenarios: Vec<ScenarioBar>,
    /// Electric/fuel cost ratio vs electricity price.
    pub cost_ratio: SweepSeries,
}

impl ChartData {
    /// Runs all generators against the normalized costs.
    pub fn build(electric: &EnergyCost, fuel: &EnergyCost, params: &AnalysisParams) -> Self {
        Self {
            electric_cost: SweepSeries::from_points(
                "electric_cost_per_km",
                electric_cost_sweep(electric.rate_per_100km),
            ),
            fuel_cost: SweepSeries::from_points(
                "fuel_cost_per_km",
                fuel_cost_baseline(fuel.cost_per_km),
            ),
            critical_price: SweepSeries::from_points(
                "critical_electric_price",
                critical_price_sweep(fuel.rate_per_100km, electric.rate_per_100km),
            ),
            scenarios: scenario_bars(
                electric.cost_per_km,
                fuel.cost_per_km,
                params.annual_distance_km,
            )
            .collect(),
            cost_ratio: SweepSeries::from_points(
                "cost_ratio",
                cost_ratio_sweep(electric.rate_per_100km, fuel.cost_per_km),
            ),
        }
    }
}
