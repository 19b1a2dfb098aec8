//! Atmosphere model: standard-day profile, non-standard day offset and derived
//! properties, with exact derivatives.

use sr_core::{NodeBatch, Real};

use crate::config::{AltitudeDefinition, AtmosphereConfig};
use crate::error::AtmosResult;
use crate::humidity;
use crate::standard::{self, GAMMA, R_AIR};

/// Sutherland coefficient for air, lbf·s/(ft²·°R^0.5).
pub const SUTHERLAND_BETA: Real = 2.269_680_783_287_349e-8;

/// Sutherland temperature for air, °R.
pub const SUTHERLAND_S: Real = 198.72;

/// An atmosphere output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Temperature,
    Pressure,
    Density,
    SpeedOfSound,
    Viscosity,
    AbsHumidity,
    /// d density / d altitude
    DensityGradient,
    /// d speed of sound / d altitude
    SpeedOfSoundGradient,
}

impl Channel {
    pub const ALL: [Channel; 8] = [
        Channel::Temperature,
        Channel::Pressure,
        Channel::Density,
        Channel::SpeedOfSound,
        Channel::Viscosity,
        Channel::AbsHumidity,
        Channel::DensityGradient,
        Channel::SpeedOfSoundGradient,
    ];

    /// Signal name used when the channel is exposed on a graph.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Pressure => "pressure",
            Channel::Density => "density",
            Channel::SpeedOfSound => "speed_of_sound",
            Channel::Viscosity => "viscosity",
            Channel::AbsHumidity => "abs_humidity",
            Channel::DensityGradient => "drho_dh",
            Channel::SpeedOfSoundGradient => "dsos_dh",
        }
    }

    pub fn units(self) -> &'static str {
        match self {
            Channel::Temperature => "degR",
            Channel::Pressure => "lbf/ft**2",
            Channel::Density => "slug/ft**3",
            Channel::SpeedOfSound => "ft/s",
            Channel::Viscosity => "lbf*s/ft**2",
            Channel::AbsHumidity => "percent",
            Channel::DensityGradient => "slug/ft**4",
            Channel::SpeedOfSoundGradient => "1/s",
        }
    }
}

/// One value per channel at a single altitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AtmospherePoint {
    pub temperature: Real,
    pub pressure: Real,
    pub density: Real,
    pub speed_of_sound: Real,
    pub viscosity: Real,
    pub abs_humidity: Real,
    pub drho_dh: Real,
    pub dsos_dh: Real,
}

impl AtmospherePoint {
    pub fn get(&self, channel: Channel) -> Real {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Pressure => self.pressure,
            Channel::Density => self.density,
            Channel::SpeedOfSound => self.speed_of_sound,
            Channel::Viscosity => self.viscosity,
            Channel::AbsHumidity => self.abs_humidity,
            Channel::DensityGradient => self.drho_dh,
            Channel::SpeedOfSoundGradient => self.dsos_dh,
        }
    }
}

/// Values at one altitude plus their derivatives w.r.t. altitude and offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereSample {
    pub value: AtmospherePoint,
    pub d_altitude: AtmospherePoint,
    pub d_offset: AtmospherePoint,
}

/// One node batch per channel. `abs_humidity` is present only when enabled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtmosphereChannels {
    pub temperature: NodeBatch,
    pub pressure: NodeBatch,
    pub density: NodeBatch,
    pub speed_of_sound: NodeBatch,
    pub viscosity: NodeBatch,
    pub abs_humidity: Option<NodeBatch>,
    pub drho_dh: NodeBatch,
    pub dsos_dh: NodeBatch,
}

impl AtmosphereChannels {
    fn collect(points: &[AtmospherePoint], with_humidity: bool) -> Self {
        let column = |c: Channel| points.iter().map(|p| p.get(c)).collect::<NodeBatch>();
        Self {
            temperature: column(Channel::Temperature),
            pressure: column(Channel::Pressure),
            density: column(Channel::Density),
            speed_of_sound: column(Channel::SpeedOfSound),
            viscosity: column(Channel::Viscosity),
            abs_humidity: with_humidity.then(|| column(Channel::AbsHumidity)),
            drho_dh: column(Channel::DensityGradient),
            dsos_dh: column(Channel::SpeedOfSoundGradient),
        }
    }

    pub fn get(&self, channel: Channel) -> Option<&NodeBatch> {
        match channel {
            Channel::Temperature => Some(&self.temperature),
            Channel::Pressure => Some(&self.pressure),
            Channel::Density => Some(&self.density),
            Channel::SpeedOfSound => Some(&self.speed_of_sound),
            Channel::Viscosity => Some(&self.viscosity),
            Channel::AbsHumidity => self.abs_humidity.as_ref(),
            Channel::DensityGradient => Some(&self.drho_dh),
            Channel::SpeedOfSoundGradient => Some(&self.dsos_dh),
        }
    }
}

/// Atmospheric state for a batch of altitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphereState {
    pub altitude: NodeBatch,
    pub properties: AtmosphereChannels,
}

/// Per-node partials of every channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmospherePartials {
    pub wrt_altitude: AtmosphereChannels,
    pub wrt_temperature_offset: AtmosphereChannels,
}

/// Two-layer standard atmosphere with a fixed non-standard day offset.
///
/// Immutable after construction; evaluation is a pure function of altitude.
#[derive(Debug, Clone)]
pub struct AtmosphereModel {
    config: AtmosphereConfig,
    offset_r: Real,
}

impl AtmosphereModel {
    /// Validate `config` and resolve the temperature offset to °R.
    pub fn new(config: AtmosphereConfig) -> AtmosResult<Self> {
        config.validate()?;
        let offset_r = config.isa_temperature_offset.to_rankine();
        tracing::debug!(
            altitude_definition = %config.altitude_definition,
            offset_r,
            rh_sl = config.sea_level_relative_humidity,
            "atmosphere model configured"
        );
        Ok(Self { config, offset_r })
    }

    pub fn config(&self) -> &AtmosphereConfig {
        &self.config
    }

    /// Temperature offset in °R.
    pub fn temperature_offset(&self) -> Real {
        self.offset_r
    }

    /// Geopotential altitude and its first two derivatives w.r.t. the input altitude.
    pub fn geopotential(&self, altitude: Real) -> (Real, Real, Real) {
        match self.config.altitude_definition {
            AltitudeDefinition::Geopotential => (altitude, 1.0, 0.0),
            AltitudeDefinition::Geodetic => standard::geopotential_from_geometric(altitude),
        }
    }

    /// Full state and derivatives at one altitude (ft).
    pub fn sample(&self, altitude: Real) -> AtmosphereSample {
        let (z, zh, zhh) = self.geopotential(altitude);
        let s = standard::standard_day(z);

        let t = s.temperature + self.offset_r;
        let t_z = s.dtemperature_dz;
        let (p, p_z, p_zz) = (s.pressure, s.dpressure_dz, s.d2pressure_dz2);

        // Ideal gas: R rho T = p
        let rho = p / (R_AIR * t);
        let rho_z = (p_z / R_AIR - rho * t_z) / t;
        let rho_zz = (p_zz / R_AIR - 2.0 * rho_z * t_z) / t;

        // a^2 = gamma R T
        let a = (GAMMA * R_AIR * t).sqrt();
        let a_z = GAMMA * R_AIR * t_z / (2.0 * a);
        let a_zz = -a_z * a_z / a;

        let mu = SUTHERLAND_BETA * t.powf(1.5) / (t + SUTHERLAND_S);
        let mu_t = SUTHERLAND_BETA * t.sqrt() * (0.5 * t + 1.5 * SUTHERLAND_S)
            / ((t + SUTHERLAND_S) * (t + SUTHERLAND_S));

        let (x, x_z) = if self.config.output_abs_humidity {
            humidity::abs_humidity(self.config.sea_level_relative_humidity, z, &s)
        } else {
            (0.0, 0.0)
        };

        let value = AtmospherePoint {
            temperature: t,
            pressure: p,
            density: rho,
            speed_of_sound: a,
            viscosity: mu,
            abs_humidity: x,
            drho_dh: rho_z * zh,
            dsos_dh: a_z * zh,
        };

        let d_altitude = AtmospherePoint {
            temperature: t_z * zh,
            pressure: p_z * zh,
            density: rho_z * zh,
            speed_of_sound: a_z * zh,
            viscosity: mu_t * t_z * zh,
            abs_humidity: x_z * zh,
            drho_dh: rho_zz * zh * zh + rho_z * zhh,
            dsos_dh: a_zz * zh * zh + a_z * zhh,
        };

        // The offset shifts T only; p and the standard-day humidity do not move.
        let rho_d = -rho / t;
        let a_d = GAMMA * R_AIR / (2.0 * a);
        let d_offset = AtmospherePoint {
            temperature: 1.0,
            pressure: 0.0,
            density: rho_d,
            speed_of_sound: a_d,
            viscosity: mu_t,
            abs_humidity: 0.0,
            drho_dh: (rho * t_z / t - rho_z) / t * zh,
            dsos_dh: -a_z * a_d / a * zh,
        };

        AtmosphereSample {
            value,
            d_altitude,
            d_offset,
        }
    }

    /// Evaluate every channel for a batch of altitudes.
    pub fn evaluate(&self, altitude: &[Real]) -> AtmosphereState {
        let points: Vec<AtmospherePoint> = altitude.iter().map(|&h| self.sample(h).value).collect();
        AtmosphereState {
            altitude: NodeBatch::from(altitude),
            properties: AtmosphereChannels::collect(&points, self.config.output_abs_humidity),
        }
    }

    /// Evaluate every channel together with its partials.
    pub fn evaluate_with_partials(
        &self,
        altitude: &[Real],
    ) -> (AtmosphereState, AtmospherePartials) {
        let samples: Vec<AtmosphereSample> = altitude.iter().map(|&h| self.sample(h)).collect();
        let with_humidity = self.config.output_abs_humidity;
        let pick = |f: fn(&AtmosphereSample) -> AtmospherePoint| {
            let points: Vec<AtmospherePoint> = samples.iter().map(f).collect();
            AtmosphereChannels::collect(&points, with_humidity)
        };

        let state = AtmosphereState {
            altitude: NodeBatch::from(altitude),
            properties: pick(|s| s.value),
        };
        let partials = AtmospherePartials {
            wrt_altitude: pick(|s| s.d_altitude),
            wrt_temperature_offset: pick(|s| s.d_offset),
        };
        (state, partials)
    }
}
