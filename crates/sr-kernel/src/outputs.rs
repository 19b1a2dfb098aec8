//! Named per-node outputs of one evaluation.

use sr_core::NodeBatch;

/// Rate outputs, always present.
pub const RATE_OUTPUT_NAMES: [&str; 7] = [
    "specific_energy_rate",
    "altitude_rate",
    "range_rate",
    "specific_energy_rate_excess",
    "altitude_rate_max",
    "true_airspeed",
    "mach",
];

/// Outputs of one kernel evaluation.
///
/// The rate channels are named fields; atmosphere pass-through channels
/// appear in `atmosphere` in the order the kernel exposes them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateOutputs {
    /// ft/s
    pub specific_energy_rate: NodeBatch,
    /// ft/s
    pub altitude_rate: NodeBatch,
    /// ft/s
    pub range_rate: NodeBatch,
    /// ft/s, at maximum thrust
    pub specific_energy_rate_excess: NodeBatch,
    /// ft/s, at maximum thrust
    pub altitude_rate_max: NodeBatch,
    /// ft/s
    pub true_airspeed: NodeBatch,
    pub mach: NodeBatch,
    pub atmosphere: Vec<(&'static str, NodeBatch)>,
}

impl RateOutputs {
    /// Look an output up by name.
    pub fn get(&self, name: &str) -> Option<&NodeBatch> {
        match name {
            "specific_energy_rate" => Some(&self.specific_energy_rate),
            "altitude_rate" => Some(&self.altitude_rate),
            "range_rate" => Some(&self.range_rate),
            "specific_energy_rate_excess" => Some(&self.specific_energy_rate_excess),
            "altitude_rate_max" => Some(&self.altitude_rate_max),
            "true_airspeed" => Some(&self.true_airspeed),
            "mach" => Some(&self.mach),
            other => self
                .atmosphere
                .iter()
                .find(|(n, _)| *n == other)
                .map(|(_, v)| v),
        }
    }

    pub(crate) fn set(&mut self, name: &'static str, values: NodeBatch) {
        match name {
            "specific_energy_rate" => self.specific_energy_rate = values,
            "altitude_rate" => self.altitude_rate = values,
            "range_rate" => self.range_rate = values,
            "specific_energy_rate_excess" => self.specific_energy_rate_excess = values,
            "altitude_rate_max" => self.altitude_rate_max = values,
            "true_airspeed" => self.true_airspeed = values,
            "mach" => self.mach = values,
            _ => self.atmosphere.push((name, values)),
        }
    }

    /// Every output name, rate channels first.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        RATE_OUTPUT_NAMES
            .into_iter()
            .chain(self.atmosphere.iter().map(|(n, _)| *n))
    }
}
