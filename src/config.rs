//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::devices::{BaseLoad, SolarPv, synthesize_net_load};
use crate::sim::curve::{Curve, HOURS};
use crate::sim::policy::ComplementPolicy;
use crate::sim::types::SimError;

/// Seed offset for the solar RNG to avoid correlation with the baseload noise.
const SOLAR_SEED_OFFSET: u64 = 1;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Engine-wide parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Explicit curve samples, overriding the synthetic profile.
    #[serde(default)]
    pub curve: CurveConfig,
    /// Baseload profile parameters.
    #[serde(default)]
    pub baseload: BaseloadConfig,
    /// Solar PV profile parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Discharge window.
    #[serde(default)]
    pub discharge: DischargeConfig,
}

/// Engine-wide parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Master random seed for the synthetic profile.
    pub seed: u64,
    /// How leftover stored energy affects hours outside the window.
    pub policy: ComplementPolicy,
    /// Report generation hours as zero in the resulting curve.
    pub absorb_generation: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            policy: ComplementPolicy::default(),
            absorb_generation: false,
        }
    }
}

/// Explicit curve samples.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveConfig {
    /// 24 hourly net load samples (kW), hour 1 first.
    pub values: Option<Vec<f64>>,
}

/// Baseload profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaseloadConfig {
    /// Baseline consumption (kW).
    pub base_kw: f64,
    /// Sinusoidal amplitude (kW).
    pub amp_kw: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation (kW).
    pub noise_std: f64,
}

impl Default for BaseloadConfig {
    fn default() -> Self {
        Self {
            base_kw: 0.8,
            amp_kw: 0.7,
            phase_rad: 1.2,
            noise_std: 0.05,
        }
    }
}

/// Solar PV profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Peak generation (kW).
    pub kw_peak: f64,
    /// Sunrise hour index (inclusive).
    pub sunrise_idx: usize,
    /// Sunset hour index (exclusive).
    pub sunset_idx: usize,
    /// Noise standard deviation as a fraction of output.
    pub noise_std: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            kw_peak: 5.0,
            sunrise_idx: 6,
            sunset_idx: 18,
            noise_std: 0.05,
        }
    }
}

/// Discharge window in 1-based inclusive hours.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DischargeConfig {
    /// First discharge hour (1-24).
    pub start_hour: usize,
    /// Last discharge hour (1-24); smaller than `start_hour` crosses midnight.
    pub end_hour: usize,
}

impl Default for DischargeConfig {
    fn default() -> Self {
        Self {
            start_hour: 19,
            end_hour: 23,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"discharge.start_hour"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the baseline scenario: 5 kW PV with an evening discharge window.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            curve: CurveConfig::default(),
            baseload: BaseloadConfig::default(),
            solar: SolarConfig::default(),
            discharge: DischargeConfig::default(),
        }
    }

    /// Returns the high-solar preset: large PV array whose surplus exceeds the
    /// evening load, so leftover energy spills into the rest of the day.
    pub fn high_solar() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            curve: CurveConfig::default(),
            baseload: BaseloadConfig {
                base_kw: 0.6,
                amp_kw: 0.4,
                noise_std: 0.03,
                ..BaseloadConfig::default()
            },
            solar: SolarConfig {
                kw_peak: 12.0,
                sunrise_idx: 5,
                sunset_idx: 19,
                ..SolarConfig::default()
            },
            discharge: DischargeConfig {
                start_hour: 20,
                end_hour: 24,
            },
        }
    }

    /// Returns the overnight preset: a discharge window crossing midnight.
    pub fn overnight() -> Self {
        Self {
            simulation: SimulationConfig {
                absorb_generation: true,
                ..SimulationConfig::default()
            },
            curve: CurveConfig::default(),
            baseload: BaseloadConfig {
                base_kw: 1.2,
                amp_kw: 0.5,
                ..BaseloadConfig::default()
            },
            solar: SolarConfig {
                kw_peak: 6.0,
                ..SolarConfig::default()
            },
            discharge: DischargeConfig {
                start_hour: 22,
                end_hour: 6,
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "high_solar", "overnight"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "high_solar" => Ok(Self::high_solar()),
            "overnight" => Ok(Self::overnight()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Generation conflicts
    /// in the discharge window depend on the built curve and are reported by
    /// the engine instead.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(values) = &self.curve.values {
            if values.len() != HOURS {
                errors.push(ConfigError {
                    field: "curve.values".into(),
                    message: format!("must have exactly {HOURS} samples, got {}", values.len()),
                });
            }
            if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
                errors.push(ConfigError {
                    field: "curve.values".into(),
                    message: format!("sample {} is not a finite number", idx + 1),
                });
            }
        }

        let sol = &self.solar;
        if sol.sunrise_idx >= sol.sunset_idx {
            errors.push(ConfigError {
                field: "solar.sunrise_idx".into(),
                message: "must be < solar.sunset_idx".into(),
            });
        }
        if sol.sunset_idx > HOURS {
            errors.push(ConfigError {
                field: "solar.sunset_idx".into(),
                message: format!("must be <= {HOURS}"),
            });
        }
        if sol.kw_peak < 0.0 {
            errors.push(ConfigError {
                field: "solar.kw_peak".into(),
                message: "must be >= 0".into(),
            });
        }

        let d = &self.discharge;
        for (field, hour) in [
            ("discharge.start_hour", d.start_hour),
            ("discharge.end_hour", d.end_hour),
        ] {
            if !(1..=HOURS).contains(&hour) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be in [1, {HOURS}], got {hour}"),
                });
            }
        }

        errors
    }

    /// Builds the raw net load curve: explicit values if given, otherwise the
    /// seeded baseload plus solar profile.
    ///
    /// # Errors
    ///
    /// Returns a `SimError` if the explicit values are not 24 finite samples.
    ///
    /// # Panics
    ///
    /// Panics if the solar parameters are invalid; call
    /// [`ScenarioConfig::validate`] first.
    pub fn build_curve(&self) -> Result<Curve, SimError> {
        if let Some(values) = &self.curve.values {
            return Curve::from_slice(values);
        }

        let seed = self.simulation.seed;
        let bl = &self.baseload;
        let mut load = BaseLoad::new(bl.base_kw, bl.amp_kw, bl.phase_rad, bl.noise_std, seed);
        let sol = &self.solar;
        let mut pv = SolarPv::new(
            sol.kw_peak,
            sol.sunrise_idx,
            sol.sunset_idx,
            sol.noise_std,
            seed.wrapping_add(SOLAR_SEED_OFFSET),
        );
        synthesize_net_load(&mut [&mut load, &mut pv])
    }
}
