//! Airspeed representations and conversion to true airspeed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sr_core::{DomainError, NodeBatch, Real};

use crate::error::AtmosError;
use crate::standard::RHO0;

/// How the velocity input is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AirspeedKind {
    /// True airspeed, ft/s.
    #[default]
    TrueAirspeed,
    /// Equivalent airspeed, ft/s.
    EquivalentAirspeed,
    /// Mach number, unitless.
    Mach,
}

impl AirspeedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AirspeedKind::TrueAirspeed => "true_airspeed",
            AirspeedKind::EquivalentAirspeed => "equivalent_airspeed",
            AirspeedKind::Mach => "mach",
        }
    }

    /// Units of the velocity input in this representation.
    pub fn units(self) -> &'static str {
        match self {
            AirspeedKind::Mach => "unitless",
            _ => "ft/s",
        }
    }
}

impl fmt::Display for AirspeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AirspeedKind {
    type Err = AtmosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tas" | "true_airspeed" => Ok(AirspeedKind::TrueAirspeed),
            "eas" | "equivalent_airspeed" => Ok(AirspeedKind::EquivalentAirspeed),
            "mach" => Ok(AirspeedKind::Mach),
            other => Err(AtmosError::Configuration {
                what: format!("unknown airspeed representation '{other}'"),
            }),
        }
    }
}

impl TryFrom<String> for AirspeedKind {
    type Error = AtmosError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AirspeedKind> for String {
    fn from(kind: AirspeedKind) -> Self {
        kind.as_str().to_string()
    }
}

/// True airspeed at one node and its partials w.r.t. the converter inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TasSample {
    pub true_airspeed: Real,
    pub d_airspeed: Real,
    pub d_density: Real,
    pub d_speed_of_sound: Real,
}

type Forward = fn(Real, Real, Real) -> TasSample;
type Inverse = fn(Real, Real, Real) -> Real;

fn tas_forward(v: Real, _rho: Real, _a: Real) -> TasSample {
    TasSample {
        true_airspeed: v,
        d_airspeed: 1.0,
        ..TasSample::default()
    }
}

fn tas_inverse(tas: Real, _rho: Real, _a: Real) -> Real {
    tas
}

fn eas_forward(v: Real, rho: Real, _a: Real) -> TasSample {
    let ratio = (RHO0 / rho).sqrt();
    let tas = v * ratio;
    TasSample {
        true_airspeed: tas,
        d_airspeed: ratio,
        d_density: -0.5 * tas / rho,
        d_speed_of_sound: 0.0,
    }
}

fn eas_inverse(tas: Real, rho: Real, _a: Real) -> Real {
    tas * (rho / RHO0).sqrt()
}

fn mach_forward(v: Real, _rho: Real, a: Real) -> TasSample {
    TasSample {
        true_airspeed: v * a,
        d_airspeed: a,
        d_density: 0.0,
        d_speed_of_sound: v,
    }
}

fn mach_inverse(tas: Real, _rho: Real, a: Real) -> Real {
    tas / a
}

/// Converts the configured airspeed representation to true airspeed.
///
/// The representation is fixed at construction; the per-node conversion is a
/// plain function pointer.
#[derive(Clone, Copy)]
pub struct AirspeedConverter {
    kind: AirspeedKind,
    forward: Forward,
    inverse: Inverse,
}

impl fmt::Debug for AirspeedConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirspeedConverter")
            .field("kind", &self.kind)
            .finish()
    }
}

impl AirspeedConverter {
    pub fn new(kind: AirspeedKind) -> Self {
        let (forward, inverse): (Forward, Inverse) = match kind {
            AirspeedKind::TrueAirspeed => (tas_forward, tas_inverse),
            AirspeedKind::EquivalentAirspeed => (eas_forward, eas_inverse),
            AirspeedKind::Mach => (mach_forward, mach_inverse),
        };
        Self {
            kind,
            forward,
            inverse,
        }
    }

    pub fn kind(&self) -> AirspeedKind {
        self.kind
    }

    /// True airspeed and partials at node `node`.
    pub fn to_true_airspeed(
        &self,
        airspeed: Real,
        density: Real,
        speed_of_sound: Real,
        node: usize,
    ) -> Result<TasSample, DomainError> {
        check_atmosphere(density, speed_of_sound, node)?;
        Ok((self.forward)(airspeed, density, speed_of_sound))
    }

    /// Inverse mapping: true airspeed back to the configured representation.
    pub fn from_true_airspeed(
        &self,
        true_airspeed: Real,
        density: Real,
        speed_of_sound: Real,
        node: usize,
    ) -> Result<Real, DomainError> {
        check_atmosphere(density, speed_of_sound, node)?;
        Ok((self.inverse)(true_airspeed, density, speed_of_sound))
    }

    /// Convert a batch to true airspeed.
    pub fn convert(
        &self,
        airspeed: &[Real],
        density: &[Real],
        speed_of_sound: &[Real],
    ) -> Result<NodeBatch, DomainError> {
        airspeed
            .iter()
            .zip(density)
            .zip(speed_of_sound)
            .enumerate()
            .map(|(i, ((&v, &rho), &a))| {
                self.to_true_airspeed(v, rho, a, i)
                    .map(|s| s.true_airspeed)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(NodeBatch::from_vec)
    }
}

fn check_atmosphere(density: Real, speed_of_sound: Real, node: usize) -> Result<(), DomainError> {
    // Also catches NaN.
    if !(density > 0.0) {
        return Err(DomainError::new("non-positive density", node, density));
    }
    if !(speed_of_sound > 0.0) {
        return Err(DomainError::new("non-positive speed of sound", node, speed_of_sound));
    }
    Ok(())
}
