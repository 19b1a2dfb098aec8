//! Empirical absolute humidity profile.
//!
//! Relative humidity decays exponentially from its sea-level value; the water
//! vapour partial pressure follows from the Magnus saturation curve at the
//! standard-day temperature, and the reported quantity is the vapour mole
//! fraction in percent. The profile is tied to the standard day, so it does not
//! move with the temperature offset.

use sr_core::Real;

use crate::standard::StandardPoint;

/// Scale height of the relative humidity decay, ft (2 km).
pub const HUMIDITY_SCALE_HEIGHT_FT: Real = 6_561.679_790_026_247;

// Magnus coefficients over liquid water, hPa and °C.
const MAGNUS_A_HPA: Real = 6.1094;
const MAGNUS_B: Real = 17.625;
const MAGNUS_C: Real = 243.04;

const PSF_PER_HPA: Real = 2.088_543_423_315_013;

/// Saturation vapour pressure (lbf/ft²) and its derivative w.r.t. temperature (°R).
pub fn saturation_pressure(temperature_r: Real) -> (Real, Real) {
    let t_c = temperature_r / 1.8 - 273.15;
    let e_s = PSF_PER_HPA * MAGNUS_A_HPA * (MAGNUS_B * t_c / (t_c + MAGNUS_C)).exp();
    let dln_dtc = MAGNUS_B * MAGNUS_C / ((t_c + MAGNUS_C) * (t_c + MAGNUS_C));
    (e_s, e_s * dln_dtc / 1.8)
}

/// Mole fraction of water vapour in percent and its geopotential derivative.
pub fn abs_humidity(rh_sea_level: Real, z: Real, standard: &StandardPoint) -> (Real, Real) {
    let decay = (-z / HUMIDITY_SCALE_HEIGHT_FT).exp();
    let (e_s, de_s) = saturation_pressure(standard.temperature);
    let x = 100.0 * rh_sea_level * decay * e_s / standard.pressure;
    let dlnx = -1.0 / HUMIDITY_SCALE_HEIGHT_FT + de_s / e_s * standard.dtemperature_dz
        - standard.dpressure_dz / standard.pressure;
    (x, x * dlnx)
}
