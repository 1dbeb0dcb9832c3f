//! Two-dimensional sensitivity matrix over simultaneous price changes.

use serde::Serialize;

/// Electric price offsets (percent), one matrix column each.
pub const ELECTRIC_OFFSETS_PCT: [i32; 11] = [-40, -30, -20, -10, 0, 10, 20, 30, 40, 50, 60];

/// Fuel price offsets (percent), one matrix row each.
pub const FUEL_OFFSETS_PCT: [i32; 9] = [-30, -20, -10, 0, 10, 20, 30, 40, 50];

/// Relative difference (percent of the larger cost) under which a cell is
/// classified as equal.
const EQUAL_BAND_PCT: f64 = 1.0;

/// Which source wins in a perturbed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellOutcome {
    /// Within 1% of each other.
    Equal,
    /// Electric is cheaper.
    ElectricBetter,
    /// Fuel is cheaper.
    FuelBetter,
}

impl CellOutcome {
    /// Short table marker.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Equal => "even",
            Self::ElectricBetter => "elec",
            Self::FuelBetter => "fuel",
        }
    }
}

/// One perturbed price combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensitivityCell {
    /// Electric price offset (percent).
    pub electric_offset_pct: i32,
    /// Fuel price offset (percent).
    pub fuel_offset_pct: i32,
    /// Perturbed electric cost per km.
    pub electric_cost_per_km: f64,
    /// Perturbed fuel cost per km.
    pub fuel_cost_per_km: f64,
    /// Absolute per-km difference.
    pub diff: f64,
    /// `diff` as a percentage of the larger cost (0 if both are 0).
    pub diff_pct: f64,
    /// Winner in this cell.
    pub outcome: CellOutcome,
    /// Set only for the zero/zero cell; display overrides it, data does not.
    pub is_current: bool,
}

impl SensitivityCell {
    /// Evaluates one cell from current per-km costs and percent offsets.
    pub fn evaluate(
        electric_cost_per_km: f64,
        fuel_cost_per_km: f64,
        electric_offset_pct: i32,
        fuel_offset_pct: i32,
    ) -> Self {
        let e_cost = electric_cost_per_km * (1.0 + f64::from(electric_offset_pct) / 100.0);
        let f_cost = fuel_cost_per_km * (1.0 + f64::from(fuel_offset_pct) / 100.0);
        let diff = e_cost - f_cost;
        let larger = e_cost.max(f_cost);
        let diff_pct = if larger > 0.0 {
            diff.abs() / larger * 100.0
        } else {
            0.0
        };
        let outcome = if diff_pct < EQUAL_BAND_PCT {
            CellOutcome::Equal
        } else if diff < 0.0 {
            CellOutcome::ElectricBetter
        } else {
            CellOutcome::FuelBetter
        };
        Self {
            electric_offset_pct,
            fuel_offset_pct,
            electric_cost_per_km: e_cost,
            fuel_cost_per_km: f_cost,
            diff: diff.abs(),
            diff_pct,
            outcome,
            is_current: electric_offset_pct == 0 && fuel_offset_pct == 0,
        }
    }
}

/// Full grid, stored row-major: one row per fuel offset, one column per
/// electric offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityMatrix {
    /// Column headers.
    pub electric_offsets_pct: Vec<i32>,
    /// Row headers.
    pub fuel_offsets_pct: Vec<i32>,
    /// Unperturbed electric cost per km.
    pub base_electric_cost_per_km: f64,
    /// Unperturbed fuel cost per km.
    pub base_fuel_cost_per_km: f64,
    cells: Vec<SensitivityCell>,
}

impl SensitivityMatrix {
    /// Builds the matrix for the standard offset vectors.
    pub fn build(electric_cost_per_km: f64, fuel_cost_per_km: f64) -> Self {
        let cells = FUEL_OFFSETS_PCT
            .into_iter()
            .flat_map(|fv| {
                ELECTRIC_OFFSETS_PCT.into_iter().map(move |ev| {
                    SensitivityCell::evaluate(electric_cost_per_km, fuel_cost_per_km, ev, fv)
                })
            })
            .collect();
        Self {
            electric_offsets_pct: ELECTRIC_OFFSETS_PCT.to_vec(),
            fuel_offsets_pct: FUEL_OFFSETS_PCT.to_vec(),
            base_electric_cost_per_km: electric_cost_per_km,
            base_fuel_cost_per_km: fuel_cost_per_km,
            cells,
        }
    }

    /// Cell at electric column `e_idx` and fuel row `f_idx`.
    pub fn cell(&self, e_idx: usize, f_idx: usize) -> Option<&SensitivityCell> {
        if e_idx >= self.electric_offsets_pct.len() {
            return None;
        }
        self.cells.get(f_idx * self.electric_offsets_pct.len() + e_idx)
    }

    /// Rows in fuel-offset order, each spanning all electric offsets.
    pub fn rows(&self) -> impl Iterator<Item = &[SensitivityCell]> {
        self.cells.chunks(self.electric_offsets_pct.len())
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[SensitivityCell] {
        &self.cells
    }

    /// The zero/zero cell.
    pub fn current(&self) -> Option<&SensitivityCell> {
        self.cells.iter().find(|c| c.is_current)
    }
}

/// Column/row header for a percent offset: `current`, `+10%`, `-20%`.
pub fn offset_label(offset_pct: i32) -> String {
    match offset_pct {
        0 => "current".to_string(),
        p if p > 0 => format!("+{p}%"),
        p => format!("{p}%"),
    }
}
