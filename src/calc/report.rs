//! Full derivation from one input snapshot, plus its text rendering.

use std::fmt;

use serde::Serialize;

use super::breakeven::{critical_electric_price, critical_fuel_price};
use super::decision::Recommendation;
use super::sensitivity::{SensitivityMatrix, offset_label};
use super::sweep::ChartData;
use super::types::{AnalysisParams, CostResult, EnergyCost, EnergySource, InputSnapshot};

/// Everything derived from an [`InputSnapshot`].
///
/// Built in one pass by [`CostReport::from_snapshot`]; holds no state
/// beyond the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    /// Inputs the report was derived from.
    pub snapshot: InputSnapshot,
    /// Tuning constants in effect.
    pub params: AnalysisParams,
    /// Normalized electric costs.
    pub electric: EnergyCost,
    /// Normalized fuel costs.
    pub fuel: EnergyCost,
    /// Headline comparison.
    pub result: CostResult,
    /// Fuel price at which fuel would match the current electric cost.
    pub critical_fuel_price: f64,
    /// Recommendation and savings.
    pub recommendation: Recommendation,
    /// Series for the four charts.
    pub charts: ChartData,
    /// Price sensitivity grid.
    pub sensitivity: SensitivityMatrix,
}

impl CostReport {
    /// Derives every output from the snapshot.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - Current inputs for both sources
    /// * `params` - Decision dead band and annual distance
    ///
    /// # Returns
    ///
    /// A fully populated report. Never fails: zero distances, prices and
    /// rates produce zeros rather than errors.
    pub fn from_snapshot(snapshot: &InputSnapshot, params: &AnalysisParams) -> Self {
        let electric = snapshot.electric.normalize();
        let fuel = snapshot.fuel.normalize();

        let diff = electric.cost_per_km - fuel.cost_per_km;
        let critical_electric = critical_electric_price(fuel.cost_per_km, electric.rate_per_100km);
        let result = CostResult {
            electric_cost_per_km: electric.cost_per_km,
            fuel_cost_per_km: fuel.cost_per_km,
            diff,
            critical_electric_price: critical_electric,
        };

        Self {
            snapshot: *snapshot,
            params: *params,
            electric,
            fuel,
            result,
            critical_fuel_price: critical_fuel_price(electric.cost_per_km, fuel.rate_per_100km),
            recommendation: Recommendation::new(diff, critical_electric, params),
            charts: ChartData::build(&electric, &fuel, params),
            sensitivity: SensitivityMatrix::build(electric.cost_per_km, fuel.cost_per_km),
        }
    }
}

/// Formats a non-negative amount rounded to whole units with `,` grouping.
pub fn format_thousands(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 && rounded != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

impl fmt::Display for CostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.electric;
        let u = &self.fuel;
        let rec = &self.recommendation;

        writeln!(f, "--- Cost Report ---")?;
        writeln!(f, "Electric cost per km:  {:.4}", e.cost_per_km)?;
        writeln!(f, "Electric per 100 km:   {:.2}", e.cost_per_100km)?;
        writeln!(
            f,
            "Electric rate:         {:.2} {}/100km",
            e.rate_per_100km,
            EnergySource::Electric.unit()
        )?;
        writeln!(f, "Fuel cost per km:      {:.4}", u.cost_per_km)?;
        writeln!(f, "Fuel per 100 km:       {:.2}", u.cost_per_100km)?;
        writeln!(
            f,
            "Fuel rate:             {:.2} {}/100km",
            u.rate_per_100km,
            EnergySource::Fuel.unit()
        )?;
        writeln!(f, "Difference per km:     {:+.4}", self.result.diff)?;
        writeln!(
            f,
            "Critical elec. price:  {:.4}",
            self.result.critical_electric_price
        )?;
        writeln!(f, "Critical fuel price:   {:.4}", self.critical_fuel_price)?;
        writeln!(f)?;
        writeln!(f, "Recommendation:        {}", rec.decision)?;
        writeln!(f, "Saving per km:         {:.4}", rec.saving_per_km)?;
        writeln!(
            f,
            "Annual saving:         {} ({} km)",
            format_thousands(rec.annual_saving),
            format_thousands(self.params.annual_distance_km)
        )?;
        writeln!(f, "{}", rec.guidance)?;
        writeln!(f)?;

        writeln!(f, "--- Scenarios (annual) ---")?;
        for bar in &self.charts.scenarios {
            writeln!(
                f,
                "{:<10} electric {:>10}  fuel {:>10}",
                bar.scenario.label,
                format_thousands(bar.annual_electric),
                format_thousands(bar.annual_fuel)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "--- Sensitivity (rows: fuel, columns: electric) ---")?;
        write!(f, "{:>8}", "")?;
        for &ev in &self.sensitivity.electric_offsets_pct {
            write!(f, " {:>7}", offset_label(ev))?;
        }
        for (row, &fv) in self
            .sensitivity
            .rows()
            .zip(self.sensitivity.fuel_offsets_pct.iter())
        {
            writeln!(f)?;
            write!(f, "{:>8}", offset_label(fv))?;
            for cell in row {
                let marker = if cell.is_current {
                    "*now*"
                } else {
                    cell.outcome.marker()
                };
                write!(f, " {marker:>7}")?;
            }
        }
        Ok(())
    }
}
