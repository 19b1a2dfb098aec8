// sr-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Force as UomForce, Length as UomLength, Mass as UomMass,
    Ratio as UomRatio, TemperatureInterval as UomTemperatureInterval, Velocity as UomVelocity,
};

use crate::batch::NodeBatch;
use crate::numeric::Real;

// Public canonical unit types (f64)
pub type Accel = UomAcceleration;
pub type Force = UomForce;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Ratio = UomRatio;
pub type TempInterval = UomTemperatureInterval;
pub type Velocity = UomVelocity;

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn fps(v: f64) -> Velocity {
    use uom::si::velocity::foot_per_second;
    Velocity::new::<foot_per_second>(v)
}

#[inline]
pub fn fps2(v: f64) -> Accel {
    use uom::si::acceleration::foot_per_second_squared;
    Accel::new::<foot_per_second_squared>(v)
}

#[inline]
pub fn slug(v: f64) -> Mass {
    use uom::si::mass::slug;
    Mass::new::<slug>(v)
}

#[inline]
pub fn lbf(v: f64) -> Force {
    use uom::si::force::pound_force;
    Force::new::<pound_force>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Batch constructors: convert unit-tagged quantities into the internal unit of
/// each port once, at the boundary.
pub fn batch_ft(values: &[Length]) -> NodeBatch {
    use uom::si::length::foot;
    values.iter().map(|v| v.get::<foot>()).collect()
}

pub fn batch_fps(values: &[Velocity]) -> NodeBatch {
    use uom::si::velocity::foot_per_second;
    values.iter().map(|v| v.get::<foot_per_second>()).collect()
}

pub fn batch_fps2(values: &[Accel]) -> NodeBatch {
    use uom::si::acceleration::foot_per_second_squared;
    values
        .iter()
        .map(|v| v.get::<foot_per_second_squared>())
        .collect()
}

pub fn batch_slug(values: &[Mass]) -> NodeBatch {
    use uom::si::mass::slug;
    values.iter().map(|v| v.get::<slug>()).collect()
}

pub fn batch_lbf(values: &[Force]) -> NodeBatch {
    use uom::si::force::pound_force;
    values.iter().map(|v| v.get::<pound_force>()).collect()
}

pub fn batch_unitless(values: &[Ratio]) -> NodeBatch {
    use uom::si::ratio::ratio;
    values.iter().map(|v| v.get::<ratio>()).collect()
}

/// Unit tag for a temperature difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureUnit {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "degR"))]
    Rankine,
    #[cfg_attr(feature = "serde", serde(rename = "degF"))]
    Fahrenheit,
    #[cfg_attr(feature = "serde", serde(rename = "K"))]
    Kelvin,
    #[cfg_attr(feature = "serde", serde(rename = "degC"))]
    Celsius,
}

/// A temperature difference with an explicit unit.
///
/// Converted to the consuming formula's unit (°R) exactly once; nothing else
/// reinterprets the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureOffset {
    pub value: Real,
    #[cfg_attr(feature = "serde", serde(default))]
    pub units: TemperatureUnit,
}

impl TemperatureOffset {
    pub fn new(value: Real, units: TemperatureUnit) -> Self {
        Self { value, units }
    }

    pub fn rankine(value: Real) -> Self {
        Self::new(value, TemperatureUnit::Rankine)
    }

    pub fn kelvin(value: Real) -> Self {
        Self::new(value, TemperatureUnit::Kelvin)
    }

    pub fn interval(&self) -> TempInterval {
        use uom::si::temperature_interval::{
            degree_celsius, degree_fahrenheit, degree_rankine, kelvin,
        };
        match self.units {
            TemperatureUnit::Rankine => TempInterval::new::<degree_rankine>(self.value),
            TemperatureUnit::Fahrenheit => TempInterval::new::<degree_fahrenheit>(self.value),
            TemperatureUnit::Kelvin => TempInterval::new::<kelvin>(self.value),
            TemperatureUnit::Celsius => TempInterval::new::<degree_celsius>(self.value),
        }
    }

    pub fn to_rankine(&self) -> Real {
        use uom::si::temperature_interval::degree_rankine;
        self.interval().get::<degree_rankine>()
    }
}

pub mod constants {
    /// Standard gravitational acceleration, ft/s^2.
    pub const G0_FPS2: f64 = 32.174_048_556;
}
