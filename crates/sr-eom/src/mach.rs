//! Mach number.

use sr_core::{DomainError, Real};
use sr_graph::{Block, Partials};

/// `velocity, speed_of_sound -> mach`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachNumber;

impl MachNumber {
    pub fn new() -> Self {
        Self
    }
}

impl Block for MachNumber {
    fn kind(&self) -> &'static str {
        "MachNumber"
    }

    fn inputs(&self) -> &[&'static str] {
        &["velocity", "speed_of_sound"]
    }

    fn outputs(&self) -> &[&'static str] {
        &["mach"]
    }

    fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError> {
        let (v, a) = (inputs[0], inputs[1]);
        for (i, out) in outputs[0].iter_mut().enumerate() {
            if !(a[i] > 0.0) {
                return Err(DomainError::new("non-positive speed of sound", i, a[i]));
            }
            *out = v[i] / a[i];
        }
        Ok(())
    }

    fn compute_partials(
        &self,
        inputs: &[&[Real]],
        partials: &mut Partials,
    ) -> Result<(), DomainError> {
        let (v, a) = (inputs[0], inputs[1]);
        partials.fill(0, 0, |i| 1.0 / a[i]);
        partials.fill(0, 1, |i| -v[i] / (a[i] * a[i]));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mach_and_partials() {
        let inputs: [&[Real]; 2] = [&[800.0], &[1000.0]];
        let mut outs = vec![vec![0.0]];
        MachNumber.compute(&inputs, &mut outs).unwrap();
        assert!((outs[0][0] - 0.8).abs() < 1e-15);

        let mut p = Partials::new(1, 2, 1);
        MachNumber.compute_partials(&inputs, &mut p).unwrap();
        assert_eq!(p.get(0, 0).unwrap(), &[1e-3]);
        assert!((p.get(0, 1).unwrap()[0] + 8e-4).abs() < 1e-18);
    }

    #[test]
    fn zero_speed_of_sound_rejected() {
        let inputs: [&[Real]; 2] = [&[800.0], &[0.0]];
        let mut outs = vec![vec![0.0]];
        assert!(MachNumber.compute(&inputs, &mut outs).is_err());
    }
}
