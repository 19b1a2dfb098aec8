//! Kernel configuration: schema, validation and file loaders.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sr_atmos::{AirspeedKind, AltitudeDefinition, AtmosphereConfig};
use sr_core::Real;
use sr_core::units::constants::G0_FPS2;

use crate::error::{KernelError, KernelResult};

/// Failure to read or parse a configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options fixed for the lifetime of a kernel instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Number of evaluation nodes every input batch must carry.
    pub num_nodes: usize,

    #[serde(default)]
    pub atmosphere: AtmosphereConfig,

    /// Representation of the `velocity` input.
    #[serde(default)]
    pub airspeed: AirspeedKind,

    /// Gravitational acceleration used by the energy-rate components, ft/s².
    #[serde(default = "default_gravity")]
    pub gravity_fps2: Real,
}

fn default_gravity() -> Real {
    G0_FPS2
}

impl KernelConfig {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            atmosphere: AtmosphereConfig::default(),
            airspeed: AirspeedKind::default(),
            gravity_fps2: default_gravity(),
        }
    }

    pub fn with_airspeed(mut self, kind: AirspeedKind) -> Self {
        self.airspeed = kind;
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: AtmosphereConfig) -> Self {
        self.atmosphere = atmosphere;
        self
    }

    pub fn validate(&self) -> KernelResult<()> {
        if self.num_nodes == 0 {
            return Err(KernelError::Configuration {
                what: "num_nodes must be positive".to_string(),
            });
        }
        if !self.gravity_fps2.is_finite() || self.gravity_fps2 <= 0.0 {
            return Err(KernelError::Configuration {
                what: format!("gravity must be positive, got {}", self.gravity_fps2),
            });
        }
        self.atmosphere.validate()?;
        Ok(())
    }
}

/// Reject unknown option names as configuration errors before the typed parse,
/// which would otherwise report them as syntax errors.
fn check_names(airspeed: Option<&str>, altitude_definition: Option<&str>) -> KernelResult<()> {
    if let Some(name) = airspeed {
        name.parse::<AirspeedKind>()?;
    }
    if let Some(name) = altitude_definition {
        name.parse::<AltitudeDefinition>()?;
    }
    Ok(())
}

pub fn from_yaml_str(text: &str) -> KernelResult<KernelConfig> {
    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(ConfigError::from)?;
    check_names(
        value.get("airspeed").and_then(serde_yaml::Value::as_str),
        value
            .get("atmosphere")
            .and_then(|a| a.get("altitude_definition"))
            .and_then(serde_yaml::Value::as_str),
    )?;
    let config: KernelConfig = serde_yaml::from_value(value).map_err(ConfigError::from)?;
    config.validate()?;
    Ok(config)
}

pub fn from_json_str(text: &str) -> KernelResult<KernelConfig> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(ConfigError::from)?;
    check_names(
        value.get("airspeed").and_then(serde_json::Value::as_str),
        value
            .get("atmosphere")
            .and_then(|a| a.get("altitude_definition"))
            .and_then(serde_json::Value::as_str),
    )?;
    let config: KernelConfig = serde_json::from_value(value).map_err(ConfigError::from)?;
    config.validate()?;
    Ok(config)
}

pub fn load_yaml(path: &Path) -> KernelResult<KernelConfig> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &Path, config: &KernelConfig) -> KernelResult<()> {
    config.validate()?;
    let content = serde_yaml::to_string(config).map_err(ConfigError::from)?;
    std::fs::write(path, content).map_err(ConfigError::from)?;
    Ok(())
}

pub fn load_json(path: &Path) -> KernelResult<KernelConfig> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
    from_json_str(&content)
}

pub fn save_json(path: &Path, config: &KernelConfig) -> KernelResult<()> {
    config.validate()?;
    let content = serde_json::to_string_pretty(config).map_err(ConfigError::from)?;
    std::fs::write(path, content).map_err(ConfigError::from)?;
    Ok(())
}
