//! sr-atmos: atmosphere and airspeed models for skyrate.
//!
//! Provides:
//! - A two-layer 1976 standard atmosphere (troposphere + lower stratosphere) in
//!   US customary units, with a non-standard day temperature offset
//! - Sutherland viscosity and an empirical absolute humidity profile
//! - Exact first and second altitude derivatives and temperature-offset derivatives
//! - Airspeed conversion (TAS, EAS, Mach) to true airspeed
//! - `Block` adapters so both models can be wired into a `BlockGraph`

pub mod airspeed;
pub mod blocks;
pub mod config;
pub mod error;
pub mod humidity;
pub mod model;
pub mod standard;

pub use airspeed::{AirspeedConverter, AirspeedKind, TasSample};
pub use blocks::{AtmosphereBlock, FlightConditionsBlock};
pub use config::{AltitudeDefinition, AtmosphereConfig};
pub use error::{AtmosError, AtmosResult};
pub use model::{
    AtmosphereChannels, AtmosphereModel, AtmospherePartials, AtmospherePoint, AtmosphereSample,
    AtmosphereState, Channel,
};
