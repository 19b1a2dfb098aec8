//! Altitude rate from specific energy rate and kinematic energy transfer.

use sr_core::{DomainError, Real};
use sr_graph::{Block, Partials};

use crate::common::Gravity;

/// `specific_energy_rate, velocity_rate, velocity -> altitude_rate`.
///
/// `dh/dt = Ps - V dV/dt / g`
#[derive(Debug, Clone, Copy, Default)]
pub struct AltitudeRate {
    gravity: Gravity,
}

impl AltitudeRate {
    pub fn new(gravity: Gravity) -> Self {
        Self { gravity }
    }

    pub fn value(&self, specific_energy_rate: Real, velocity_rate: Real, velocity: Real) -> Real {
        specific_energy_rate - velocity * velocity_rate / self.gravity.value()
    }
}

impl Block for AltitudeRate {
    fn kind(&self) -> &'static str {
        "AltitudeRate"
    }

    fn inputs(&self) -> &[&'static str] {
        &["specific_energy_rate", "velocity_rate", "velocity"]
    }

    fn outputs(&self) -> &[&'static str] {
        &["altitude_rate"]
    }

    fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError> {
        let (ps, vdot, v) = (inputs[0], inputs[1], inputs[2]);
        for (i, out) in outputs[0].iter_mut().enumerate() {
            *out = self.value(ps[i], vdot[i], v[i]);
        }
        Ok(())
    }

    fn compute_partials(
        &self,
        inputs: &[&[Real]],
        partials: &mut Partials,
    ) -> Result<(), DomainError> {
        let g = self.gravity.value();
        let (vdot, v) = (inputs[1], inputs[2]);
        partials.fill(0, 0, |_| 1.0);
        partials.fill(0, 1, |i| -v[i] / g);
        partials.fill(0, 2, |i| -vdot[i] / g);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_flight_climb_equals_ps() {
        let hdot = AltitudeRate::default();
        assert_eq!(hdot.value(25.0, 0.0, 700.0), 25.0);
    }

    #[test]
    fn acceleration_trades_climb() {
        let hdot = AltitudeRate::new(Gravity::new(32.0).unwrap());
        // 10 - 640 * 2 / 32
        assert!((hdot.value(10.0, 2.0, 640.0) + 30.0).abs() < 1e-12);
    }

    #[test]
    fn partials() {
        let hdot = AltitudeRate::new(Gravity::new(32.0).unwrap());
        let inputs: [&[Real]; 3] = [&[1.0], &[2.0], &[640.0]];
        let mut p = Partials::new(1, 3, 1);
        hdot.compute_partials(&inputs, &mut p).unwrap();
        assert_eq!(p.get(0, 0).unwrap(), &[1.0]);
        assert_eq!(p.get(0, 1).unwrap(), &[-20.0]);
        assert_eq!(p.get(0, 2).unwrap(), &[-0.0625]);
    }
}
