//! sr-eom: point-mass rate components for skyrate.
//!
//! Each component is a `Block` with closed-form partials:
//! - `SpecificEnergyRate`: Ps = V (T - D) / (m g)
//! - `AltitudeRate`: dh/dt = Ps - (V / g) dV/dt
//! - `RangeRate`: ground speed = sqrt(V^2 - (dh/dt)^2)
//! - `MachNumber`: M = V / a
//!
//! Gravity is a construction parameter, never a global.

pub mod altitude_rate;
pub mod common;
pub mod energy;
pub mod error;
pub mod mach;
pub mod range_rate;

pub use altitude_rate::AltitudeRate;
pub use common::Gravity;
pub use energy::SpecificEnergyRate;
pub use error::{EomError, EomResult};
pub use mach::MachNumber;
pub use range_rate::RangeRate;
