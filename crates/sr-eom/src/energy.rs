//! Specific energy rate (specific excess power).

use sr_core::{DomainError, Real};
use sr_graph::{Block, Partials};

use crate::common::Gravity;

/// `velocity, mass, thrust_total, drag -> specific_energy_rate`.
///
/// Instantiated once per thrust level; the graph binds `thrust_total` to the
/// nominal or maximum thrust signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificEnergyRate {
    gravity: Gravity,
}

/// Value and partials w.r.t. (velocity, mass, thrust, drag).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRatePoint {
    pub value: Real,
    pub d_velocity: Real,
    pub d_mass: Real,
    pub d_thrust: Real,
    pub d_drag: Real,
}

impl SpecificEnergyRate {
    pub fn new(gravity: Gravity) -> Self {
        Self { gravity }
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn point(
        &self,
        velocity: Real,
        mass: Real,
        thrust: Real,
        drag: Real,
        node: usize,
    ) -> Result<EnergyRatePoint, DomainError> {
        if !(mass > 0.0) {
            return Err(DomainError::new("non-positive mass", node, mass));
        }
        let weight = mass * self.gravity.value();
        let ps = velocity * (thrust - drag) / weight;
        Ok(EnergyRatePoint {
            value: ps,
            d_velocity: (thrust - drag) / weight,
            d_mass: -ps / mass,
            d_thrust: velocity / weight,
            d_drag: -velocity / weight,
        })
    }

    fn points<'a>(
        &'a self,
        inputs: &'a [&[Real]],
    ) -> impl Iterator<Item = Result<EnergyRatePoint, DomainError>> + 'a {
        let [v, m, t, d] = [inputs[0], inputs[1], inputs[2], inputs[3]];
        (0..v.len()).map(move |i| self.point(v[i], m[i], t[i], d[i], i))
    }
}

impl Block for SpecificEnergyRate {
    fn kind(&self) -> &'static str {
        "SpecificEnergyRate"
    }

    fn inputs(&self) -> &[&'static str] {
        &["velocity", "mass", "thrust_total", "drag"]
    }

    fn outputs(&self) -> &[&'static str] {
        &["specific_energy_rate"]
    }

    fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError> {
        for (i, p) in self.points(inputs).enumerate() {
            outputs[0][i] = p?.value;
        }
        Ok(())
    }

    fn compute_partials(
        &self,
        inputs: &[&[Real]],
        partials: &mut Partials,
    ) -> Result<(), DomainError> {
        for (i, p) in self.points(inputs).enumerate() {
            let p = p?;
            partials.entry_mut(0, 0)[i] = p.d_velocity;
            partials.entry_mut(0, 1)[i] = p.d_mass;
            partials.entry_mut(0, 2)[i] = p.d_thrust;
            partials.entry_mut(0, 3)[i] = p.d_drag;
        }
        Ok(())
    }
}
