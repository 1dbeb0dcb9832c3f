//! Core value types: input snapshots, normalized costs, and tuning parameters.

use serde::Serialize;

/// Distance assumed for annual projections (km per year).
pub const ANNUAL_DISTANCE_KM: f64 = 15_000.0;

/// Per-km cost difference below which both sources count as equal.
pub const DECISION_EPSILON: f64 = 0.01;

/// One of the two energy sources a dual-fuel vehicle can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    /// Grid charging, priced per kWh.
    Electric,
    /// Gasoline, priced per liter.
    Fuel,
}

impl EnergySource {
    /// Unit the source is bought in.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Electric => "kWh",
            Self::Fuel => "L",
        }
    }
}

/// Raw inputs for one energy source, in either of the two supported modes.
///
/// Mode A records what was actually spent and how far it went; mode B
/// states a consumption rate directly. Both carry the current unit price,
/// which mode A needs to back out the implied consumption rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EnergyInput {
    /// Money spent and the distance driven on it.
    SpendDistance {
        /// Amount spent (currency).
        spend: f64,
        /// Distance covered by that spend (km).
        distance_km: f64,
        /// Current unit price (currency per kWh or liter).
        unit_price: f64,
    },
    /// Consumption rate and unit price.
    RatePrice {
        /// Consumption per 100 km (kWh or liters).
        rate_per_100km: f64,
        /// Current unit price (currency per kWh or liter).
        unit_price: f64,
    },
}

impl EnergyInput {
    /// Current unit price regardless of mode.
    pub fn unit_price(&self) -> f64 {
        match *self {
            Self::SpendDistance { unit_price, .. } | Self::RatePrice { unit_price, .. } => {
                unit_price
            }
        }
    }
}

/// Current input snapshot for both energy sources.
///
/// Every derived value is a pure function of this struct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputSnapshot {
    /// Electric charging inputs.
    pub electric: EnergyInput,
    /// Gasoline inputs.
    pub fuel: EnergyInput,
}

impl InputSnapshot {
    /// Builds a snapshot from the canonical price/rate form.
    ///
    /// # Examples
    ///
    /// ```
    /// use dualfuel_cost::calc::types::InputSnapshot;
    ///
    /// let snap = InputSnapshot::from_rates(2.1, 27.62, 7.0, 7.0);
    /// assert_eq!(snap.electric.unit_price(), 2.1);
    /// ```
    pub fn from_rates(
        electric_price: f64,
        electric_rate_per_100km: f64,
        fuel_price: f64,
        fuel_rate_per_100km: f64,
    ) -> Self {
        Self {
            electric: EnergyInput::RatePrice {
                rate_per_100km: electric_rate_per_100km,
                unit_price: electric_price,
            },
            fuel: EnergyInput::RatePrice {
                rate_per_100km: fuel_rate_per_100km,
                unit_price: fuel_price,
            },
        }
    }

    /// Input for the given source.
    pub fn input(&self, source: EnergySource) -> &EnergyInput {
        match source {
            EnergySource::Electric => &self.electric,
            EnergySource::Fuel => &self.fuel,
        }
    }
}

/// Normalized costs for one energy source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyCost {
    /// Cost per kilometer (currency/km).
    pub cost_per_km: f64,
    /// Cost per 100 kilometers (currency/100 km).
    pub cost_per_100km: f64,
    /// Consumption per 100 km, implied from spend in mode A.
    pub rate_per_100km: f64,
    /// Unit price used for the derivation.
    pub unit_price: f64,
}

/// Headline comparison of both sources at current prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostResult {
    /// Electric cost per km.
    pub electric_cost_per_km: f64,
    /// Fuel cost per km.
    pub fuel_cost_per_km: f64,
    /// `electric_cost_per_km - fuel_cost_per_km`.
    pub diff: f64,
    /// Electricity price at which both per-km costs match (0 if undefined).
    pub critical_electric_price: f64,
}

/// Tuning constants for the decision and annual projections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisParams {
    /// Annual distance used for savings and scenario totals (km).
    pub annual_distance_km: f64,
    /// Dead band around zero for the per-km difference.
    pub decision_epsilon: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            annual_distance_km: ANNUAL_DISTANCE_KM,
            decision_epsilon: DECISION_EPSILON,
        }
    }
}
