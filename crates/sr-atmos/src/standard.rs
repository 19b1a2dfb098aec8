//! 1976 standard-day profile, sea level to 20 km geopotential, US customary units.
//!
//! Two layers:
//! - troposphere: linear lapse, `T = T0 - L z`, `p = P0 (T / T0)^(g0 / (L R))`
//! - lower stratosphere: isothermal, `p = p11 exp(-g0 (z - z11) / (R T11))`
//!
//! Both branches evaluate the tropopause from the same expressions, so
//! temperature and pressure are continuous there.

use sr_core::Real;
use sr_core::units::constants::G0_FPS2;

/// Specific gas constant of dry air, ft·lbf/(slug·°R).
pub const R_AIR: Real = 1716.561_876_410_79;

/// Ratio of specific heats.
pub const GAMMA: Real = 1.4;

/// Sea-level standard temperature, °R.
pub const T0: Real = 518.67;

/// Sea-level standard pressure, lbf/ft².
pub const P0: Real = 2116.216_623_673_937;

/// Sea-level standard density, slug/ft³.
pub const RHO0: Real = P0 / (R_AIR * T0);

/// Tropospheric lapse rate, °R/ft.
pub const LAPSE: Real = 0.003_566_16;

/// Tropopause geopotential altitude, ft (11 km).
pub const Z_TROPOPAUSE: Real = 36_089.238_845_144_355;

/// Tropopause temperature, °R.
pub const T_TROPOPAUSE: Real = T0 - LAPSE * Z_TROPOPAUSE;

/// Top of the modelled envelope, ft (20 km geopotential).
pub const Z_CEILING: Real = 65_616.797_900_262_46;

/// Effective earth radius for the geopotential conversion, ft.
pub const EARTH_RADIUS_FT: Real = 20_855_531.496_062_99;

/// Standard-day state and its geopotential derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardPoint {
    pub temperature: Real,
    pub dtemperature_dz: Real,
    pub pressure: Real,
    pub dpressure_dz: Real,
    pub d2pressure_dz2: Real,
}

/// Standard-day state at geopotential altitude `z` (ft).
///
/// The tropopause itself belongs to the troposphere. Altitudes below sea level
/// extend the tropospheric lapse; altitudes above the ceiling extend the
/// isothermal layer.
pub fn standard_day(z: Real) -> StandardPoint {
    if z <= Z_TROPOPAUSE {
        troposphere(z)
    } else {
        lower_stratosphere(z)
    }
}

pub fn troposphere(z: Real) -> StandardPoint {
    let t = T0 - LAPSE * z;
    let p = P0 * (t / T0).powf(G0_FPS2 / (LAPSE * R_AIR));
    finish(t, -LAPSE, p)
}

pub fn lower_stratosphere(z: Real) -> StandardPoint {
    let p11 = troposphere(Z_TROPOPAUSE).pressure;
    let p = p11 * (-G0_FPS2 * (z - Z_TROPOPAUSE) / (R_AIR * T_TROPOPAUSE)).exp();
    finish(T_TROPOPAUSE, 0.0, p)
}

// Hydrostatic balance dp/dz = -g0 p / (R T) holds in both layers.
fn finish(t: Real, t_z: Real, p: Real) -> StandardPoint {
    let k = G0_FPS2 / R_AIR;
    let p_z = -k * p / t;
    let p_zz = -k * (p_z * t - p * t_z) / (t * t);
    StandardPoint {
        temperature: t,
        dtemperature_dz: t_z,
        pressure: p,
        dpressure_dz: p_z,
        d2pressure_dz2: p_zz,
    }
}

/// Geometric altitude to geopotential: `z = r0 h / (r0 + h)`.
///
/// Returns `(z, dz/dh, d2z/dh2)`.
pub fn geopotential_from_geometric(h: Real) -> (Real, Real, Real) {
    let r0 = EARTH_RADIUS_FT;
    let denom = r0 + h;
    let z = r0 * h / denom;
    let dz = r0 * r0 / (denom * denom);
    let d2z = -2.0 * r0 * r0 / (denom * denom * denom);
    (z, dz, d2z)
}
