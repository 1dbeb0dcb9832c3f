//! Break-even ("critical") unit prices.

/// Electricity price at which electric cost per km equals `fuel_cost_per_km`,
/// holding the electric consumption rate fixed.
///
/// Returns 0 when `electric_rate_per_100km` is not positive.
pub fn critical_electric_price(fuel_cost_per_km: f64, electric_rate_per_100km: f64) -> f64 {
    if electric_rate_per_100km > 0.0 {
        fuel_cost_per_km * 100.0 / electric_rate_per_100km
    } else {
        0.0
    }
}

/// Fuel price at which fuel cost per km equals `electric_cost_per_km`,
/// holding the fuel consumption rate fixed.
///
/// Returns 0 when `fuel_rate_per_100km` is not positive.
pub fn critical_fuel_price(electric_cost_per_km: f64, fuel_rate_per_100km: f64) -> f64 {
    if fuel_rate_per_100km > 0.0 {
        electric_cost_per_km * 100.0 / fuel_rate_per_100km
    } else {
        0.0
    }
}
