use std::path::PathBuf;

use clap::Parser;

/// Compare per-km costs of charging and refueling a dual-fuel vehicle.
#[derive(Parser, Debug)]
#[command(name = "dualfuel-cost", version, about, long_about = None)]
pub struct Cli {
    /// Load inputs from a TOML profile
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub profile: Option<PathBuf>,

    /// Use a built-in preset (default, rated, home_charging, fuel_spike)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override one input, e.g. `--set electric.spend=30` (repeatable)
    #[arg(long = "set", value_name = "SECTION.FIELD=VALUE")]
    pub overrides: Vec<String>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Write chart series and the sensitivity matrix as CSV files
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Read `section.field=value` edits from stdin and reprint the summary
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Set the logging level
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,
}

impl Cli {
    /// Preset to fall back to when no profile file is given.
    pub fn preset_or_default(&self) -> &str {
        self.preset.as_deref().unwrap_or("default")
    }
}
