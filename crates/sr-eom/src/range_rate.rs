//! Ground speed under a no-wind, flat-earth assumption.

use sr_core::{DomainError, Real};
use sr_graph::{Block, Partials};

/// `altitude_rate, velocity -> range_rate`.
///
/// `range_rate = sqrt(V^2 - (dh/dt)^2)`.
///
/// Requires `|dh/dt| < V`. Vertical flight (`|dh/dt| = V`) has a well-defined
/// value of zero but singular partials, so it is rejected along with
/// `|dh/dt| > V` instead of being accepted at the boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeRate;

/// Value and partials w.r.t. (altitude_rate, velocity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRatePoint {
    pub value: Real,
    pub d_altitude_rate: Real,
    pub d_velocity: Real,
}

impl RangeRate {
    pub fn new() -> Self {
        Self
    }

    pub fn point(
        &self,
        altitude_rate: Real,
        velocity: Real,
        node: usize,
    ) -> Result<RangeRatePoint, DomainError> {
        if !(altitude_rate.abs() < velocity) {
            return Err(DomainError::new(
                "climb rate magnitude not below true airspeed",
                node,
                altitude_rate,
            ));
        }
        let r = (velocity * velocity - altitude_rate * altitude_rate).sqrt();
        Ok(RangeRatePoint {
            value: r,
            d_altitude_rate: -altitude_rate / r,
            d_velocity: velocity / r,
        })
    }
}

impl Block for RangeRate {
    fn kind(&self) -> &'static str {
        "RangeRate"
    }

    fn inputs(&self) -> &[&'static str] {
        &["altitude_rate", "velocity"]
    }

    fn outputs(&self) -> &[&'static str] {
        &["range_rate"]
    }

    fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError> {
        let (hdot, v) = (inputs[0], inputs[1]);
        for (i, out) in outputs[0].iter_mut().enumerate() {
            *out = self.point(hdot[i], v[i], i)?.value;
        }
        Ok(())
    }

    fn compute_partials(
        &self,
        inputs: &[&[Real]],
        partials: &mut Partials,
    ) -> Result<(), DomainError> {
        let (hdot, v) = (inputs[0], inputs[1]);
        for i in 0..partials.len() {
            let p = self.point(hdot[i], v[i], i)?;
            partials.entry_mut(0, 0)[i] = p.d_altitude_rate;
            partials.entry_mut(0, 1)[i] = p.d_velocity;
        }
        Ok(())
    }
}
