//! Conversion of both input modes into per-kilometer costs.
//!
//! Every division is guarded: a zero distance, price or rate yields 0
//! instead of an infinity or NaN.

use super::types::{EnergyCost, EnergyInput};

/// Cost per km from money spent over a distance (mode A).
///
/// Returns 0 when `distance_km` is not positive.
pub fn cost_per_km_from_spend(spend: f64, distance_km: f64) -> f64 {
    if distance_km > 0.0 {
        spend / distance_km
    } else {
        0.0
    }
}

/// Cost per km from a consumption rate and unit price (mode B).
pub fn cost_per_km_from_rate(rate_per_100km: f64, unit_price: f64) -> f64 {
    unit_price * rate_per_100km / 100.0
}

/// Consumption per 100 km implied by a per-km cost at the given unit price.
///
/// Returns 0 when `unit_price` is not positive.
pub fn implied_rate_per_100km(cost_per_km: f64, unit_price: f64) -> f64 {
    let cost_per_100km = cost_per_km * 100.0;
    if unit_price > 0.0 {
        cost_per_100km / unit_price
    } else {
        0.0
    }
}

impl EnergyInput {
    /// Cost per km for this input.
    pub fn cost_per_km(&self) -> f64 {
        match *self {
            Self::SpendDistance {
                spend, distance_km, ..
            } => cost_per_km_from_spend(spend, distance_km),
            Self::RatePrice {
                rate_per_100km,
                unit_price,
            } => cost_per_km_from_rate(rate_per_100km, unit_price),
        }
    }

    /// Consumption per 100 km, stated (mode B) or implied (mode A).
    pub fn rate_per_100km(&self) -> f64 {
        match *self {
            Self::SpendDistance { unit_price, .. } => {
                implied_rate_per_100km(self.cost_per_km(), unit_price)
            }
            Self::RatePrice { rate_per_100km, .. } => rate_per_100km,
        }
    }

    /// Converts to the canonical rate form, keeping the unit price.
    ///
    /// A mode A input with a zero unit price has no defined rate and maps
    /// to a zero rate.
    pub fn to_rate_form(&self) -> Self {
        Self::RatePrice {
            rate_per_100km: self.rate_per_100km(),
            unit_price: self.unit_price(),
        }
    }

    /// Full normalized view of this input.
    pub fn normalize(&self) -> EnergyCost {
        let cost_per_km = self.cost_per_km();
        EnergyCost {
            cost_per_km,
            cost_per_100km: cost_per_km * 100.0,
            rate_per_100km: self.rate_per_100km(),
            unit_price: self.unit_price(),
        }
    }
}
