//! Three-way recommendation from the per-km cost difference.

use std::fmt;

use serde::Serialize;

use super::types::{AnalysisParams, EnergySource};

/// Which energy source is currently cheaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Fuel is cheaper by more than the dead band.
    FuelCheaper,
    /// Electricity is cheaper by more than the dead band.
    ElectricCheaper,
    /// Costs are within the dead band of each other.
    Equal,
}

impl Decision {
    /// Classifies `diff = electric - fuel` against `±epsilon`.
    ///
    /// The three states partition the real line: values exactly at the
    /// threshold fall into `Equal`.
    pub fn classify(diff: f64, epsilon: f64) -> Self {
        if diff > epsilon {
            Self::FuelCheaper
        } else if diff < -epsilon {
            Self::ElectricCheaper
        } else {
            Self::Equal
        }
    }

    /// Short headline for the recommendation.
    pub fn title(self) -> &'static str {
        match self {
            Self::FuelCheaper => "Refueling is cheaper",
            Self::ElectricCheaper => "Charging is cheaper",
            Self::Equal => "Costs are roughly equal",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Decision plus the numbers that back it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Classified outcome.
    pub decision: Decision,
    /// Saving per km from picking the cheaper source (`|diff|`).
    pub saving_per_km: f64,
    /// `saving_per_km` over the annual distance.
    pub annual_saving: f64,
    /// Break-even electricity price quoted in the guidance.
    pub critical_electric_price: f64,
    /// Human-readable price guidance.
    pub guidance: String,
}

impl Recommendation {
    /// Builds the recommendation for a per-km difference and break-even price.
    ///
    /// # Arguments
    ///
    /// * `diff` - `electric_cost_per_km - fuel_cost_per_km`
    /// * `critical_electric_price` - Break-even electricity price
    /// * `params` - Dead band and annual distance
    pub fn new(diff: f64, critical_electric_price: f64, params: &AnalysisParams) -> Self {
        let decision = Decision::classify(diff, params.decision_epsilon);
        let saving_per_km = diff.abs();
        let price = format!(
            "{critical_electric_price:.2} per {}",
            EnergySource::Electric.unit()
        );
        let guidance = match decision {
            Decision::FuelCheaper => {
                format!("Electricity must drop to {price} or below for charging to pay off")
            }
            Decision::ElectricCheaper => {
                format!("Electricity could rise to {price} and charging still pays off")
            }
            Decision::Equal => format!("Break-even electricity price: {price}"),
        };
        Self {
            decision,
            saving_per_km,
            annual_saving: saving_per_km * params.annual_distance_km,
            critical_electric_price,
            guidance,
        }
    }
}
