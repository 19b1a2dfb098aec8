//! Atmosphere configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sr_core::units::TemperatureOffset;

use crate::error::{AtmosError, AtmosResult};
use crate::standard::T_TROPOPAUSE;

/// How the altitude input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AltitudeDefinition {
    /// Altitude is already geopotential; used as-is.
    #[default]
    Geopotential,
    /// Altitude is geometric and converted to geopotential before the layer model.
    Geodetic,
}

impl AltitudeDefinition {
    pub fn as_str(self) -> &'static str {
        match self {
            AltitudeDefinition::Geopotential => "geopotential",
            AltitudeDefinition::Geodetic => "geodetic",
        }
    }
}

impl fmt::Display for AltitudeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AltitudeDefinition {
    type Err = AtmosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "geopotential" => Ok(AltitudeDefinition::Geopotential),
            "geodetic" | "geometric" => Ok(AltitudeDefinition::Geodetic),
            other => Err(AtmosError::Configuration {
                what: format!("unknown altitude definition '{other}'"),
            }),
        }
    }
}

impl TryFrom<String> for AltitudeDefinition {
    type Error = AtmosError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AltitudeDefinition> for String {
    fn from(def: AltitudeDefinition) -> Self {
        def.as_str().to_string()
    }
}

/// Options fixed at atmosphere construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereConfig {
    #[serde(default)]
    pub altitude_definition: AltitudeDefinition,

    /// Non-standard day offset added to the standard temperature profile.
    #[serde(default)]
    pub isa_temperature_offset: TemperatureOffset,

    /// Relative humidity at sea level, 0..=1.
    #[serde(default = "default_sea_level_relative_humidity")]
    pub sea_level_relative_humidity: f64,

    #[serde(default = "default_true")]
    pub output_dsos_dh: bool,

    #[serde(default = "default_true")]
    pub output_drho_dh: bool,

    #[serde(default = "default_true")]
    pub output_abs_humidity: bool,
}

fn default_sea_level_relative_humidity() -> f64 {
    0.70
}

fn default_true() -> bool {
    true
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            altitude_definition: AltitudeDefinition::default(),
            isa_temperature_offset: TemperatureOffset::default(),
            sea_level_relative_humidity: default_sea_level_relative_humidity(),
            output_dsos_dh: true,
            output_drho_dh: true,
            output_abs_humidity: true,
        }
    }
}

impl AtmosphereConfig {
    pub fn with_temperature_offset(mut self, offset: TemperatureOffset) -> Self {
        self.isa_temperature_offset = offset;
        self
    }

    pub fn with_altitude_definition(mut self, def: AltitudeDefinition) -> Self {
        self.altitude_definition = def;
        self
    }

    /// Reject options no atmosphere can be built from.
    pub fn validate(&self) -> AtmosResult<()> {
        let rh = self.sea_level_relative_humidity;
        if !rh.is_finite() || !(0.0..=1.0).contains(&rh) {
            return Err(AtmosError::Configuration {
                what: format!("sea-level relative humidity must lie in [0, 1], got {rh}"),
            });
        }

        let offset = self.isa_temperature_offset.to_rankine();
        if !offset.is_finite() {
            return Err(AtmosError::Configuration {
                what: format!("ISA temperature offset must be finite, got {offset}"),
            });
        }
        if T_TROPOPAUSE + offset <= 0.0 {
            return Err(AtmosError::Configuration {
                what: format!(
                    "ISA temperature offset of {offset} degR makes the tropopause temperature \
                     non-positive"
                ),
            });
        }
        Ok(())
    }
}
