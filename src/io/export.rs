//! CSV and JSON export of derived report data.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::calc::report::CostReport;
use crate::calc::sensitivity::SensitivityMatrix;
use crate::calc::sweep::{ScenarioBar, SweepSeries};

/// File written for the cost vs electricity price chart.
pub const COST_SWEEP_FILE: &str = "cost_vs_electric_price.csv";
/// File written for the critical price vs fuel price chart.
pub const CRITICAL_SWEEP_FILE: &str = "critical_vs_fuel_price.csv";
/// File written for the scenario bar chart.
pub const SCENARIO_FILE: &str = "scenarios.csv";
/// File written for the cost ratio chart.
pub const RATIO_SWEEP_FILE: &str = "cost_ratio.csv";
/// File written for the sensitivity matrix.
pub const SENSITIVITY_FILE: &str = "sensitivity.csv";

/// Column header for scenario export.
const SCENARIO_HEADER: &str = "scenario,electric_multiplier,fuel_multiplier,\
                               annual_electric,annual_fuel";

/// Column header for sensitivity export.
const SENSITIVITY_HEADER: &str = "electric_offset_pct,fuel_offset_pct,\
                                  electric_cost_per_km,fuel_cost_per_km,\
                                  diff,diff_pct,outcome,is_current";

/// Failure while writing exported data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem or writer failure.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// CSV encoding failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// JSON encoding failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Series passed together do not share parameter values.
    #[error("series \"{0}\" is not aligned with the first series")]
    Misaligned(&'static str),
}

/// Writes series sharing one parameter axis as CSV columns.
///
/// The header is `param,label` followed by each series name; one row per
/// parameter value.
///
/// # Arguments
///
/// * `series` - Series to write side by side (same parameter values)
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns `ExportError::Misaligned` if a series has different parameter
/// values than the first, or an I/O / CSV error if writing fails.
pub fn write_series_csv(series: &[&SweepSeries], writer: impl Write) -> Result<(), ExportError> {
    let Some(first) = series.first() else {
        return Ok(());
    };
    for s in &series[1..] {
        let aligned = s.points.len() == first.points.len()
            && s.points
                .iter()
                .zip(&first.points)
                .all(|(a, b)| a.param == b.param);
        if !aligned {
            return Err(ExportError::Misaligned(s.name));
        }
    }

    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let mut header = vec!["param", "label"];
    header.extend(series.iter().map(|s| s.name));
    wtr.write_record(&header)?;

    for (i, point) in first.points.iter().enumerate() {
        let mut row = vec![format!("{:.2}", point.param), point.label()];
        row.extend(series.iter().map(|s| format!("{:.6}", s.points[i].value)));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes scenario bars as CSV.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_scenarios_csv(bars: &[ScenarioBar], writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SCENARIO_HEADER.split(',').map(str::trim))?;
    for bar in bars {
        wtr.write_record(&[
            bar.scenario.label.to_string(),
            format!("{:.2}", bar.scenario.electric_multiplier),
            format!("{:.2}", bar.scenario.fuel_multiplier),
            format!("{:.2}", bar.annual_electric),
            format!("{:.2}", bar.annual_fuel),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the sensitivity matrix as CSV, one row per cell in row-major order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_sensitivity_csv(
    matrix: &SensitivityMatrix,
    writer: impl Write,
) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SENSITIVITY_HEADER.split(',').map(str::trim))?;
    for cell in matrix.cells() {
        wtr.write_record(&[
            cell.electric_offset_pct.to_string(),
            cell.fuel_offset_pct.to_string(),
            format!("{:.6}", cell.electric_cost_per_km),
            format!("{:.6}", cell.fuel_cost_per_km),
            format!("{:.6}", cell.diff),
            format!("{:.4}", cell.diff_pct),
            cell.outcome.marker().to_string(),
            cell.is_current.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the full report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &CostReport, mut writer: impl Write) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}

fn create(dir: &Path, name: &str) -> Result<(PathBuf, io::BufWriter<File>), ExportError> {
    let path = dir.join(name);
    let file = File::create(&path)?;
    Ok((path, io::BufWriter::new(file)))
}

/// Exports every chart series and the sensitivity matrix into `dir`.
///
/// Creates the directory if needed. Output is deterministic for identical
/// reports.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
pub fn export_all(report: &CostReport, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir)?;
    let charts = &report.charts;
    let mut written = Vec::with_capacity(5);

    let (path, out) = create(dir, COST_SWEEP_FILE)?;
    write_series_csv(&[&charts.electric_cost, &charts.fuel_cost], out)?;
    written.push(path);

    let (path, out) = create(dir, CRITICAL_SWEEP_FILE)?;
    write_series_csv(&[&charts.critical_price], out)?;
    written.push(path);

    let (path, out) = create(dir, SCENARIO_FILE)?;
    write_scenarios_csv(&charts.scenarios, out)?;
    written.push(path);

    let (path, out) = create(dir, RATIO_SWEEP_FILE)?;
    write_series_csv(&[&charts.cost_ratio], out)?;
    written.push(path);

    let (path, out) = create(dir, SENSITIVITY_FILE)?;
    write_sensitivity_csv(&report.sensitivity, out)?;
    written.push(path);

    info!(dir = %dir.display(), files = written.len(), "exported report data");
    Ok(written)
}
