//! Fitting configuration
//!
//! All lengths are in inches and all angles in degrees, matching the units the
//! probing routine records and the outline model consumes.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::yaml::{parse_yaml_file, YamlError};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "keyfit.yaml";

/// Largest number of search steps allowed on each side of zero
pub const MAX_HALF_STEPS: f64 = 100_000.0;

/// Tunable constants for the fitting engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitConfig {
    /// Keytop plastic thickness added to the measured shoulder length
    pub plastic_thickness: f64,

    /// Subtracted from the median top-surface height
    pub key_height_offset: f64,

    /// Half-range of the rotation search
    pub max_rotation: f64,

    /// Rotation search step
    pub angle_step: f64,

    /// Weight of tail-band slack relative to front-band slack
    pub tail_weight: f64,

    /// Points with y at or below this value belong to the front band
    pub band_split_y: f64,

    /// Outward clearance applied to front-band walls
    pub front_overhang: f64,

    /// Outward clearance applied to tail-band walls
    pub tail_overhang: f64,

    /// Y used for synthesized front points when a key has no front probes
    pub fallback_front_y: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            plastic_thickness: 0.09,
            key_height_offset: 0.0,
            max_rotation: 2.0,
            angle_step: 0.01,
            tail_weight: 3.0,
            band_split_y: 0.75,
            front_overhang: 0.005,
            tail_overhang: 0.01,
            fallback_front_y: -1.2,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl FitConfig {
    /// Load configuration from an explicit path, or from `keyfit.yaml` in
    /// `dir` when present, falling back to defaults
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                parse_yaml_file::<FitConfig>(path)?
            }
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if candidate.exists() {
                    parse_yaml_file::<FitConfig>(&candidate)?
                } else {
                    FitConfig::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values the search and wall calculations cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields: [(&'static str, f64); 9] = [
            ("plastic_thickness", self.plastic_thickness),
            ("key_height_offset", self.key_height_offset),
            ("max_rotation", self.max_rotation),
            ("angle_step", self.angle_step),
            ("tail_weight", self.tail_weight),
            ("band_split_y", self.band_split_y),
            ("front_overhang", self.front_overhang),
            ("tail_overhang", self.tail_overhang),
            ("fallback_front_y", self.fallback_front_y),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite, got {}", value),
                });
            }
        }

        if self.angle_step <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "angle_step",
                reason: format!("must be positive, got {}", self.angle_step),
            });
        }

        let half_steps = self.max_rotation / self.angle_step;
        if half_steps > MAX_HALF_STEPS {
            return Err(ConfigError::Invalid {
                field: "max_rotation",
                reason: format!(
                    "{} / angle_step {} gives {:.0} search steps per side, limit is {}",
                    self.max_rotation, self.angle_step, half_steps, MAX_HALF_STEPS
                ),
            });
        }

        for (field, value) in [
            ("max_rotation", self.max_rotation),
            ("tail_weight", self.tail_weight),
            ("plastic_thickness", self.plastic_thickness),
            ("front_overhang", self.front_overhang),
            ("tail_overhang", self.tail_overhang),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be non-negative, got {}", value),
                });
            }
        }

        Ok(())
    }

    /// Number of search steps on each side of zero
    pub fn half_steps(&self) -> i64 {
        (self.max_rotation / self.angle_step + 1e-9).floor() as i64
    }
}
