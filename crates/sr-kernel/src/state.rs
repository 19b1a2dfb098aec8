//! Per-call flight state inputs.

use sr_core::NodeBatch;
use sr_core::units::{
    Accel, Force, Length, Mass, Ratio, Velocity, batch_fps, batch_fps2, batch_ft, batch_lbf,
    batch_slug, batch_unitless,
};

use crate::error::{KernelError, KernelResult};

/// Graph input names, in evaluation order.
pub const INPUT_NAMES: [&str; 7] = [
    "altitude",
    "velocity",
    "velocity_rate",
    "mass",
    "thrust_total",
    "drag",
    "thrust_max_total",
];

/// Flight state for a batch of nodes, in internal units.
///
/// `velocity` is expressed in the kernel's configured airspeed representation
/// (ft/s for TAS/EAS, unitless for Mach). `velocity_rate` is the rate of change
/// of true airspeed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlightState {
    /// ft
    pub altitude: NodeBatch,
    pub velocity: NodeBatch,
    /// ft/s²
    pub velocity_rate: NodeBatch,
    /// slug
    pub mass: NodeBatch,
    /// lbf
    pub thrust_total: NodeBatch,
    /// lbf
    pub drag: NodeBatch,
    /// lbf
    pub thrust_max_total: NodeBatch,
}

impl FlightState {
    /// Build from unit-tagged quantities; each is converted to its internal unit once.
    pub fn from_quantities(
        altitude: &[Length],
        velocity: &[Velocity],
        velocity_rate: &[Accel],
        mass: &[Mass],
        thrust_total: &[Force],
        drag: &[Force],
        thrust_max_total: &[Force],
    ) -> Self {
        Self {
            altitude: batch_ft(altitude),
            velocity: batch_fps(velocity),
            velocity_rate: batch_fps2(velocity_rate),
            mass: batch_slug(mass),
            thrust_total: batch_lbf(thrust_total),
            drag: batch_lbf(drag),
            thrust_max_total: batch_lbf(thrust_max_total),
        }
    }

    /// Replace the velocity with Mach numbers.
    pub fn with_mach(mut self, mach: &[Ratio]) -> Self {
        self.velocity = batch_unitless(mach);
        self
    }

    /// Number of nodes, taken from `altitude`.
    pub fn len(&self) -> usize {
        self.altitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.altitude.is_empty()
    }

    /// Columns in `INPUT_NAMES` order.
    pub fn columns(&self) -> [&NodeBatch; 7] {
        [
            &self.altitude,
            &self.velocity,
            &self.velocity_rate,
            &self.mass,
            &self.thrust_total,
            &self.drag,
            &self.thrust_max_total,
        ]
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut NodeBatch> {
        match index {
            0 => Some(&mut self.altitude),
            1 => Some(&mut self.velocity),
            2 => Some(&mut self.velocity_rate),
            3 => Some(&mut self.mass),
            4 => Some(&mut self.thrust_total),
            5 => Some(&mut self.drag),
            6 => Some(&mut self.thrust_max_total),
            _ => None,
        }
    }

    /// Every column must carry exactly `num_nodes` values.
    pub fn check_len(&self, num_nodes: usize) -> KernelResult<()> {
        for (name, column) in INPUT_NAMES.iter().zip(self.columns()) {
            if column.len() != num_nodes {
                tracing::debug!(
                    input = name,
                    len = column.len(),
                    num_nodes,
                    "input length mismatch"
                );
                return Err(KernelError::Shape {
                    what: "flight state column length",
                    expected: num_nodes,
                    actual: column.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_core::units::{fps, fps2, ft, lbf, slug, unitless};

    #[test]
    fn from_quantities_converts_units() {
        use uom::si::length::meter;
        let state = FlightState::from_quantities(
            &[Length::new::<meter>(3048.0)],
            &[fps(700.0)],
            &[fps2(0.5)],
            &[slug(1000.0)],
            &[lbf(5000.0)],
            &[lbf(4000.0)],
            &[lbf(8000.0)],
        );
        assert!((state.altitude[0] - 10_000.0).abs() < 1e-9);
        assert!((state.mass[0] - 1000.0).abs() < 1e-9);
        assert_eq!(state.len(), 1);

        let mach = state.with_mach(&[unitless(0.8)]);
        assert_eq!(mach.velocity[0], 0.8);
    }

    #[test]
    fn ragged_columns_rejected() {
        let mut state = FlightState::from_quantities(
            &[ft(0.0), ft(1.0)],
            &[fps(500.0), fps(500.0)],
            &[fps2(0.0), fps2(0.0)],
            &[slug(1.0), slug(1.0)],
            &[lbf(1.0), lbf(1.0)],
            &[lbf(1.0), lbf(1.0)],
            &[lbf(1.0), lbf(1.0)],
        );
        assert!(state.check_len(2).is_ok());
        assert!(state.check_len(3).is_err());

        state.drag = NodeBatch::from_vec(vec![1.0]);
        assert!(matches!(
            state.check_len(2),
            Err(KernelError::Shape { actual: 1, .. })
        ));
        assert!(state.column_mut(7).is_none());
    }
}
