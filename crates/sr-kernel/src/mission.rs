//! The mission rate kernel: atmosphere, airspeed and point-mass rate blocks
//! wired into one graph.
//!
//! ```text
//! altitude ──> atmosphere ──> density, speed_of_sound, ...
//! velocity ──> flight_conditions ──> true_airspeed ──> mach
//!                                  │
//!   specific_power ──> altitude_rate ──> groundspeed
//!   excess_specific_power ──> altitude_rate_max       (thrust_max_total)
//! ```

use sr_atmos::{AtmosphereBlock, AtmosphereModel, FlightConditionsBlock};
use sr_core::{Real, SignalId};
use sr_eom::{AltitudeRate, Gravity, MachNumber, RangeRate, SpecificEnergyRate};
use sr_graph::{BindingTable, BlockGraph, Evaluation, WiringBuilder};

use crate::config::KernelConfig;
use crate::error::KernelResult;
use crate::jacobian::Jacobian;
use crate::outputs::{RATE_OUTPUT_NAMES, RateOutputs};
use crate::state::{FlightState, INPUT_NAMES};

/// Immutable, thread-safe evaluator of the mission rate equations.
#[derive(Debug)]
pub struct MissionEom {
    config: KernelConfig,
    graph: BlockGraph,
    outputs: Vec<(&'static str, SignalId)>,
}

impl MissionEom {
    /// Validate `config` and build the wiring.
    pub fn new(config: KernelConfig) -> KernelResult<Self> {
        config.validate()?;
        tracing::debug!(?config, "building mission kernel");

        let atmosphere = AtmosphereBlock::new(AtmosphereModel::new(config.atmosphere.clone())?);
        let atmosphere_outputs: Vec<&'static str> =
            atmosphere.channels().iter().map(|c| c.name()).collect();
        let g = Gravity::new(config.gravity_fps2)?;

        let mut builder = WiringBuilder::new();
        for name in INPUT_NAMES {
            builder.add_input(name);
        }

        builder.add_block("atmosphere", atmosphere, BindingTable::new());
        builder.add_block(
            "flight_conditions",
            FlightConditionsBlock::new(config.airspeed),
            BindingTable::new().bind("airspeed", "velocity"),
        );
        builder.add_block(
            "mach",
            MachNumber::new(),
            BindingTable::new().bind("velocity", "true_airspeed"),
        );
        builder.add_block(
            "specific_power",
            SpecificEnergyRate::new(g),
            BindingTable::new().bind("velocity", "true_airspeed"),
        );
        builder.add_block(
            "altitude_rate",
            AltitudeRate::new(g),
            BindingTable::new().bind("velocity", "true_airspeed"),
        );
        builder.add_block(
            "groundspeed",
            RangeRate::new(),
            BindingTable::new().bind("velocity", "true_airspeed"),
        );
        builder.add_block(
            "excess_specific_power",
            SpecificEnergyRate::new(g),
            BindingTable::new()
                .bind("velocity", "true_airspeed")
                .bind("thrust_total", "thrust_max_total")
                .bind("specific_energy_rate", "specific_energy_rate_excess"),
        );
        builder.add_block(
            "altitude_rate_max",
            AltitudeRate::new(g),
            BindingTable::new()
                .bind("velocity", "true_airspeed")
                .bind("specific_energy_rate", "specific_energy_rate_excess")
                .bind("altitude_rate", "altitude_rate_max"),
        );

        let graph = builder.build()?;

        let outputs = RATE_OUTPUT_NAMES
            .into_iter()
            .chain(atmosphere_outputs)
            .map(|name| {
                graph
                    .signal_id(name)
                    .map(|id| (name, id))
                    .ok_or_else(|| sr_graph::GraphError::UnknownSignal {
                        name: name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            graph,
            outputs,
        })
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn graph(&self) -> &BlockGraph {
        &self.graph
    }

    pub fn num_nodes(&self) -> usize {
        self.config.num_nodes
    }

    /// Exposed output names, rate channels first.
    pub fn output_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.outputs.iter().map(|(name, _)| *name)
    }

    /// Outputs and their full analytic Jacobian.
    pub fn evaluate(&self, state: &FlightState) -> KernelResult<(RateOutputs, Jacobian)> {
        let span = tracing::trace_span!("mission_eom.evaluate", nodes = self.num_nodes());
        let _enter = span.enter();

        let eval = self.run(state, |graph, columns| graph.evaluate(columns))?;
        Ok((self.collect_outputs(&eval), self.collect_jacobian(&eval)))
    }

    /// Outputs only, without propagating derivatives.
    pub fn evaluate_values(&self, state: &FlightState) -> KernelResult<RateOutputs> {
        let eval = self.run(state, |graph, columns| graph.evaluate_values(columns))?;
        Ok(self.collect_outputs(&eval))
    }

    /// As `evaluate`, splitting the node batch into chunks evaluated in parallel.
    pub fn evaluate_par(
        &self,
        state: &FlightState,
        chunk: usize,
    ) -> KernelResult<(RateOutputs, Jacobian)> {
        let span =
            tracing::trace_span!("mission_eom.evaluate_par", nodes = self.num_nodes(), chunk);
        let _enter = span.enter();

        let eval = self.run(state, |graph, columns| graph.evaluate_par(columns, chunk))?;
        Ok((self.collect_outputs(&eval), self.collect_jacobian(&eval)))
    }

    fn run<F>(&self, state: &FlightState, f: F) -> KernelResult<Evaluation>
    where
        F: FnOnce(&BlockGraph, &[&[Real]]) -> Result<Evaluation, sr_graph::EvalError>,
    {
        state.check_len(self.num_nodes())?;
        let columns = state.columns().map(|c| c.as_slice());
        let eval = f(&self.graph, &columns)?;
        Ok(eval)
    }

    fn collect_outputs(&self, eval: &Evaluation) -> RateOutputs {
        let mut out = RateOutputs::default();
        for &(name, id) in &self.outputs {
            out.set(name, eval.value(id).clone());
        }
        out
    }

    fn collect_jacobian(&self, eval: &Evaluation) -> Jacobian {
        let mut jac = Jacobian::new(
            eval.len(),
            self.output_names().collect(),
            INPUT_NAMES.to_vec(),
        );
        for (o, &(_, id)) in self.outputs.iter().enumerate() {
            for i in 0..INPUT_NAMES.len() {
                if let Some(d) = eval.derivative(id, i) {
                    jac.insert(o, i, d.clone());
                }
            }
        }
        jac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_atmos::{AirspeedKind, AtmosphereConfig};

    fn state(n: usize) -> FlightState {
        FlightState {
            altitude: vec![10_000.0; n].into(),
            velocity: vec![700.0; n].into(),
            velocity_rate: vec![0.5; n].into(),
            mass: vec![1_000.0; n].into(),
            thrust_total: vec![7_000.0; n].into(),
            drag: vec![6_000.0; n].into(),
            thrust_max_total: vec![12_000.0; n].into(),
        }
    }

    #[test]
    fn evaluation_order_respects_dependencies() {
        let kernel = MissionEom::new(KernelConfig::new(2)).unwrap();
        let order: Vec<&str> = kernel
            .graph()
            .evaluation_order()
            .iter()
            .map(|id| kernel.graph().blocks()[id.slot()].name.as_str())
            .collect();
        let pos = |n: &str| order.iter().position(|&b| b == n).unwrap();
        assert!(pos("atmosphere") < pos("flight_conditions"));
        assert!(pos("flight_conditions") < pos("specific_power"));
        assert!(pos("specific_power") < pos("altitude_rate"));
        assert!(pos("altitude_rate") < pos("groundspeed"));
        assert!(pos("excess_specific_power") < pos("altitude_rate_max"));
        assert_eq!(order.len(), 8);
    }

    #[test]
    fn outputs_follow_atmosphere_flags() {
        let atmosphere = AtmosphereConfig {
            output_abs_humidity: false,
            output_dsos_dh: false,
            ..AtmosphereConfig::default()
        };
        let kernel = MissionEom::new(KernelConfig::new(1).with_atmosphere(atmosphere)).unwrap();
        let names: Vec<&str> = kernel.output_names().collect();
        assert!(names.contains(&"drho_dh"));
        assert!(!names.contains(&"dsos_dh"));
        assert!(!names.contains(&"abs_humidity"));
        assert_eq!(names.len(), 7 + 6);
    }

    #[test]
    fn wrong_node_count_is_shape_error() {
        let kernel = MissionEom::new(KernelConfig::new(3)).unwrap();
        let err = kernel.evaluate(&state(2)).unwrap_err();
        assert!(matches!(err, crate::KernelError::Shape { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn mach_input_reproduced() {
        let kernel =
            MissionEom::new(KernelConfig::new(2).with_airspeed(AirspeedKind::Mach)).unwrap();
        let mut s = state(2);
        s.velocity = vec![0.6, 0.9].into();
        let out = kernel.evaluate_values(&s).unwrap();
        assert!((out.mach[0] - 0.6).abs() < 1e-12);
        assert!((out.mach[1] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn jacobian_covers_nonzero_pairs() {
        let kernel = MissionEom::new(KernelConfig::new(2)).unwrap();
        let (_, jac) = kernel.evaluate(&state(2)).unwrap();
        assert!(jac.partial("range_rate", "thrust_total").is_some());
        assert!(jac.partial("range_rate", "thrust_max_total").is_none());
        assert!(jac.partial("altitude_rate_max", "thrust_max_total").is_some());
        assert!(jac.partial("altitude_rate_max", "thrust_total").is_none());
        // TAS input: no path from altitude to the rates
        assert!(jac.partial("specific_energy_rate", "altitude").is_none());
        assert!(jac.partial("density", "altitude").is_some());
        assert!(jac.partial("mach", "altitude").is_some());
    }
}
