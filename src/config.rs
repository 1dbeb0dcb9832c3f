//! TOML-based vehicle profile configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calc::types::{
    ANNUAL_DISTANCE_KM, AnalysisParams, DECISION_EPSILON, EnergyInput, EnergySource, InputSnapshot,
};
use crate::input::coerce_non_negative;

/// Input mode for spend-over-distance sections.
pub const MODE_SPEND: &str = "spend";
/// Input mode for rate-times-price sections.
pub const MODE_RATE: &str = "rate";

/// Top-level profile parsed from TOML.
///
/// All sections have defaults matching the `default` preset. Load from
/// TOML with [`ProfileConfig::from_toml_file`] or use
/// [`ProfileConfig::default_profile`] for the built-in default.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Electric charging inputs.
    #[serde(default)]
    pub electric: ElectricConfig,
    /// Gasoline inputs.
    #[serde(default)]
    pub fuel: FuelConfig,
    /// Decision and projection tuning.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Electric charging inputs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElectricConfig {
    /// `"spend"` (spend + distance) or `"rate"` (kWh/100 km + price).
    pub mode: String,
    /// Money spent on charging (spend mode).
    pub spend: f64,
    /// Distance driven on that charge, km (spend mode).
    pub distance_km: f64,
    /// Consumption, kWh per 100 km (rate mode).
    pub rate_per_100km: f64,
    /// Electricity price per kWh.
    pub unit_price: f64,
}

impl Default for ElectricConfig {
    fn default() -> Self {
        Self {
            mode: MODE_SPEND.to_string(),
            spend: 29.0,
            distance_km: 50.0,
            rate_per_100km: 0.0,
            unit_price: 2.1,
        }
    }
}

/// Gasoline inputs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuelConfig {
    /// `"spend"` (spend + distance) or `"rate"` (L/100 km + price).
    pub mode: String,
    /// Money spent on fuel (spend mode).
    pub spend: f64,
    /// Distance driven on that fill, km (spend mode).
    pub distance_km: f64,
    /// Consumption, liters per 100 km (rate mode).
    pub rate_per_100km: f64,
    /// Fuel price per liter.
    pub unit_price: f64,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            mode: MODE_SPEND.to_string(),
            spend: 100.0,
            distance_km: 200.0,
            rate_per_100km: 0.0,
            unit_price: 7.0,
        }
    }
}

/// Decision and projection tuning.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Annual distance for savings and scenario totals (km).
    pub annual_distance_km: f64,
    /// Per-km difference treated as a tie.
    pub decision_epsilon: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            annual_distance_km: ANNUAL_DISTANCE_KM,
            decision_epsilon: DECISION_EPSILON,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"electric.distance_km"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Mutable view over one energy section, shared by both section types.
struct SectionMut<'a> {
    mode: &'a mut String,
    spend: &'a mut f64,
    distance_km: &'a mut f64,
    rate_per_100km: &'a mut f64,
    unit_price: &'a mut f64,
}

fn energy_input(
    mode: &str,
    spend: f64,
    distance_km: f64,
    rate: f64,
    unit_price: f64,
) -> EnergyInput {
    if mode == MODE_RATE {
        EnergyInput::RatePrice {
            rate_per_100km: rate,
            unit_price,
        }
    } else {
        EnergyInput::SpendDistance {
            spend,
            distance_km,
            unit_price,
        }
    }
}

fn validate_section(
    name: &str,
    mode: &str,
    values: [(&str, f64); 4],
    errors: &mut Vec<ConfigError>,
) {
    if mode != MODE_SPEND && mode != MODE_RATE {
        errors.push(ConfigError::new(
            format!("{name}.mode"),
            format!("must be \"{MODE_SPEND}\" or \"{MODE_RATE}\", got \"{mode}\""),
        ));
    }
    for (field, value) in values {
        if !value.is_finite() || value < 0.0 {
            errors.push(ConfigError::new(
                format!("{name}.{field}"),
                "must be a finite number >= 0",
            ));
        }
    }
}

impl ElectricConfig {
    /// Engine input for this section.
    pub fn to_input(&self) -> EnergyInput {
        energy_input(
            &self.mode,
            self.spend,
            self.distance_km,
            self.rate_per_100km,
            self.unit_price,
        )
    }

    fn fields_mut(&mut self) -> SectionMut<'_> {
        SectionMut {
            mode: &mut self.mode,
            spend: &mut self.spend,
            distance_km: &mut self.distance_km,
            rate_per_100km: &mut self.rate_per_100km,
            unit_price: &mut self.unit_price,
        }
    }
}

impl FuelConfig {
    /// Engine input for this section.
    pub fn to_input(&self) -> EnergyInput {
        energy_input(
            &self.mode,
            self.spend,
            self.distance_km,
            self.rate_per_100km,
            self.unit_price,
        )
    }

    fn fields_mut(&mut self) -> SectionMut<'_> {
        SectionMut {
            mode: &mut self.mode,
            spend: &mut self.spend,
            distance_km: &mut self.distance_km,
            rate_per_100km: &mut self.rate_per_100km,
            unit_price: &mut self.unit_price,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self::default_profile()
    }
}

impl ProfileConfig {
    /// Spend-based profile using typical charging and refueling receipts.
    pub fn default_profile() -> Self {
        Self {
            electric: ElectricConfig::default(),
            fuel: FuelConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }

    /// Rate-based profile: 27.62 kWh/100 km at 2.1, 7 L/100 km at 7.0.
    pub fn rated() -> Self {
        Self {
            electric: ElectricConfig {
                mode: MODE_RATE.to_string(),
                rate_per_100km: 27.62,
                unit_price: 2.1,
                ..ElectricConfig::default()
            },
            fuel: FuelConfig {
                mode: MODE_RATE.to_string(),
                rate_per_100km: 7.0,
                unit_price: 7.0,
                ..FuelConfig::default()
            },
            analysis: AnalysisConfig::default(),
        }
    }

    /// Off-peak home charging against average fuel prices.
    pub fn home_charging() -> Self {
        Self {
            electric: ElectricConfig {
                mode: MODE_RATE.to_string(),
                rate_per_100km: 16.0,
                unit_price: 0.6,
                ..ElectricConfig::default()
            },
            fuel: FuelConfig {
                mode: MODE_RATE.to_string(),
                rate_per_100km: 6.5,
                unit_price: 7.8,
                ..FuelConfig::default()
            },
            analysis: AnalysisConfig::default(),
        }
    }

    /// Default charging receipts against a fuel price spike.
    pub fn fuel_spike() -> Self {
        Self {
            fuel: FuelConfig {
                mode: MODE_RATE.to_string(),
                rate_per_100km: 7.0,
                unit_price: 10.5,
                ..FuelConfig::default()
            },
            ..Self::default_profile()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "rated", "home_charging", "fuel_spike"];

    /// Loads a profile from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::default_profile()),
            "rated" => Ok(Self::rated()),
            "home_charging" => Ok(Self::home_charging()),
            "fuel_spike" => Ok(Self::fuel_spike()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a profile from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "reading profile");
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("profile", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a profile from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Engine input snapshot for this profile.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            electric: self.electric.to_input(),
            fuel: self.fuel.to_input(),
        }
    }

    /// Analysis parameters for this profile.
    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            annual_distance_km: self.analysis.annual_distance_km,
            decision_epsilon: self.analysis.decision_epsilon,
        }
    }

    /// Section for the given source.
    fn section_mut(&mut self, source: EnergySource) -> SectionMut<'_> {
        match source {
            EnergySource::Electric => self.electric.fields_mut(),
            EnergySource::Fuel => self.fuel.fields_mut(),
        }
    }

    /// Applies one raw field edit, e.g. `("electric.spend", "30")`.
    ///
    /// Numeric values are coerced the way form input is: anything empty,
    /// unparsable or negative becomes 0. Modes must be spelled exactly.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown field path or mode.
    pub fn set_field(&mut self, path: &str, raw: &str) -> Result<(), ConfigError> {
        let (section, field) = path
            .split_once('.')
            .ok_or_else(|| ConfigError::new(path, "expected <section>.<field>"))?;

        if section == "analysis" {
            let value = coerce_non_negative(raw);
            match field {
                "annual_distance_km" => self.analysis.annual_distance_km = value,
                "decision_epsilon" => self.analysis.decision_epsilon = value,
                _ => return Err(ConfigError::new(path, "unknown field")),
            }
            return Ok(());
        }

        let source = match section {
            "electric" => EnergySource::Electric,
            "fuel" => EnergySource::Fuel,
            _ => return Err(ConfigError::new(path, "unknown section")),
        };
        let s = self.section_mut(source);
        match field {
            "mode" => {
                let mode = raw.trim();
                if mode != MODE_SPEND && mode != MODE_RATE {
                    return Err(ConfigError::new(
                        path,
                        format!("must be \"{MODE_SPEND}\" or \"{MODE_RATE}\", got \"{mode}\""),
                    ));
                }
                *s.mode = mode.to_string();
            }
            "spend" => *s.spend = coerce_non_negative(raw),
            "distance_km" => *s.distance_km = coerce_non_negative(raw),
            "rate_per_100km" => *s.rate_per_100km = coerce_non_negative(raw),
            "unit_price" => *s.unit_price = coerce_non_negative(raw),
            _ => return Err(ConfigError::new(path, "unknown field")),
        }
        Ok(())
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let e = &self.electric;
        validate_section(
            "electric",
            &e.mode,
            [
                ("spend", e.spend),
                ("distance_km", e.distance_km),
                ("rate_per_100km", e.rate_per_100km),
                ("unit_price", e.unit_price),
            ],
            &mut errors,
        );

        let f = &self.fuel;
        validate_section(
            "fuel",
            &f.mode,
            [
                ("spend", f.spend),
                ("distance_km", f.distance_km),
                ("rate_per_100km", f.rate_per_100km),
                ("unit_price", f.unit_price),
            ],
            &mut errors,
        );

        let a = &self.analysis;
        if !a.annual_distance_km.is_finite() || a.annual_distance_km < 0.0 {
            errors.push(ConfigError::new(
                "analysis.annual_distance_km",
                "must be a finite number >= 0",
            ));
        }
        if !a.decision_epsilon.is_finite() || a.decision_epsilon < 0.0 {
            errors.push(ConfigError::new(
                "analysis.decision_epsilon",
                "must be a finite number >= 0",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_valid() {
        let cfg = ProfileConfig::default_profile();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = ProfileConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ProfileConfig::PRESETS {
            let cfg = ProfileConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn default_snapshot_uses_spend_mode() {
        let snap = ProfileConfig::default_profile().snapshot();
        assert_eq!(
            snap.electric,
            EnergyInput::SpendDistance {
                spend: 29.0,
                distance_km: 50.0,
                unit_price: 2.1,
            }
        );
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[electric]
mode = "rate"
rate_per_100km = 18.0
unit_price = 1.1

[fuel]
mode = "spend"
spend = 300.0
distance_km = 520.0
unit_price = 7.4

[analysis]
annual_distance_km = 20000.0
decision_epsilon = 0.02
"#;
        let cfg = ProfileConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| &*c.electric.mode), Some("rate"));
        assert_eq!(cfg.as_ref().map(|c| c.fuel.distance_km), Some(520.0));
        assert_eq!(
            cfg.as_ref().map(|c| c.params().annual_distance_km),
            Some(20_000.0)
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[electric]
spend = 29.0
bogus_field = true
"#;
        assert!(ProfileConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[fuel]
unit_price = 8.2
"#;
        let cfg = ProfileConfig::from_toml_str(toml).ok();
        // price overridden
        assert_eq!(cfg.as_ref().map(|c| c.fuel.unit_price), Some(8.2));
        // spend kept default
        assert_eq!(cfg.as_ref().map(|c| c.fuel.spend), Some(100.0));
        // electric section kept default
        assert_eq!(cfg.as_ref().map(|c| c.electric.spend), Some(29.0));
    }

    #[test]
    fn validation_catches_bad_mode() {
        let mut cfg = ProfileConfig::default_profile();
        cfg.fuel.mode = "liters".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "fuel.mode"));
    }

    #[test]
    fn validation_catches_negative_and_nan() {
        let mut cfg = ProfileConfig::default_profile();
        cfg.electric.unit_price = -1.0;
        cfg.analysis.annual_distance_km = f64::NAN;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "electric.unit_price"));
        assert!(errors.iter().any(|e| e.field == "analysis.annual_distance_km"));
    }

    #[test]
    fn zero_distance_is_valid() {
        let mut cfg = ProfileConfig::default_profile();
        cfg.electric.distance_km = 0.0;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn set_field_coerces_numbers() {
        let mut cfg = ProfileConfig::default_profile();
        assert!(cfg.set_field("electric.spend", "35").is_ok());
        assert_eq!(cfg.electric.spend, 35.0);
        assert!(cfg.set_field("fuel.unit_price", "oops").is_ok());
        assert_eq!(cfg.fuel.unit_price, 0.0);
        assert!(cfg.set_field("analysis.annual_distance_km", "-5").is_ok());
        assert_eq!(cfg.analysis.annual_distance_km, 0.0);
    }

    #[test]
    fn set_field_switches_mode() {
        let mut cfg = ProfileConfig::default_profile();
        assert!(cfg.set_field("fuel.mode", "rate").is_ok());
        assert!(cfg.set_field("fuel.rate_per_100km", "6.8").is_ok());
        assert_eq!(
            cfg.snapshot().fuel,
            EnergyInput::RatePrice {
                rate_per_100km: 6.8,
                unit_price: 7.0,
            }
        );
    }

    #[test]
    fn set_field_rejects_unknown_paths() {
        let mut cfg = ProfileConfig::default_profile();
        assert!(cfg.set_field("battery.spend", "1").is_err());
        assert!(cfg.set_field("electric.colour", "1").is_err());
        assert!(cfg.set_field("spend", "1").is_err());
        assert!(cfg.set_field("electric.mode", "hydrogen").is_err());
        assert_eq!(cfg, ProfileConfig::default_profile());
    }
}
