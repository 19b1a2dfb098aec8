//! Shared helpers for rate components.

use sr_core::Real;
use sr_core::units::{Accel, constants::G0_FPS2};

use crate::error::{EomError, EomResult};

/// Gravitational acceleration, ft/s², fixed per component instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity(Real);

impl Gravity {
    pub fn new(fps2: Real) -> EomResult<Self> {
        if !fps2.is_finite() || fps2 <= 0.0 {
            return Err(EomError::NonPhysical {
                what: "gravity",
                value: fps2,
            });
        }
        Ok(Self(fps2))
    }

    pub fn from_quantity(g: Accel) -> EomResult<Self> {
        use uom::si::acceleration::foot_per_second_squared;
        Self::new(g.get::<foot_per_second_squared>())
    }

    pub fn value(self) -> Real {
        self.0
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self(G0_FPS2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_must_be_positive() {
        assert!(Gravity::new(32.174).is_ok());
        assert!(Gravity::new(0.0).is_err());
        assert!(Gravity::new(-9.8).is_err());
        assert!(Gravity::new(f64::NAN).is_err());
    }

    #[test]
    fn gravity_from_si_quantity() {
        use uom::si::acceleration::meter_per_second_squared;
        let g = Gravity::from_quantity(Accel::new::<meter_per_second_squared>(9.80665)).unwrap();
        assert!((g.value() - G0_FPS2).abs() < 1e-8);
    }
}
