//! Smoke tests wiring the rate components into a graph.

use proptest::prelude::*;
use sr_core::Real;
use sr_eom::{AltitudeRate, Gravity, RangeRate, SpecificEnergyRate};
use sr_graph::{BindingTable, BlockGraph, WiringBuilder};

fn rates_graph() -> BlockGraph {
    let g = Gravity::default();
    let mut builder = WiringBuilder::new();
    for name in ["velocity", "velocity_rate", "mass", "thrust_total", "drag", "thrust_max_total"] {
        builder.add_input(name);
    }
    builder.add_block("specific_power", SpecificEnergyRate::new(g), BindingTable::new());
    builder.add_block("altitude_rate", AltitudeRate::new(g), BindingTable::new());
    builder.add_block("groundspeed", RangeRate::new(), BindingTable::new());
    builder.add_block(
        "excess_specific_power",
        SpecificEnergyRate::new(g),
        BindingTable::new()
            .bind("thrust_total", "thrust_max_total")
            .bind("specific_energy_rate", "specific_energy_rate_excess"),
    );
    builder.add_block(
        "altitude_rate_max",
        AltitudeRate::new(g),
        BindingTable::new()
            .bind("specific_energy_rate", "specific_energy_rate_excess")
            .bind("altitude_rate", "altitude_rate_max"),
    );
    builder.build().unwrap()
}

fn value(graph: &BlockGraph, inputs: &[&[Real]], name: &str) -> Vec<Real> {
    let eval = graph.evaluate(inputs).unwrap();
    eval.value(graph.signal_id(name).unwrap()).to_vec()
}

#[test]
fn level_unaccelerated_flight() {
    let graph = rates_graph();
    let inputs: [&[Real]; 6] = [&[750.0], &[0.0], &[1200.0], &[6000.0], &[6000.0], &[9000.0]];
    assert_eq!(value(&graph, &inputs, "specific_energy_rate"), vec![0.0]);
    assert_eq!(value(&graph, &inputs, "altitude_rate"), vec![0.0]);
    assert_eq!(value(&graph, &inputs, "range_rate"), vec![750.0]);
    assert!(value(&graph, &inputs, "altitude_rate_max")[0] > 0.0);
}

#[test]
fn shared_formula_two_bindings() {
    let graph = rates_graph();
    let inputs: [&[Real]; 6] = [&[700.0], &[1.5], &[1000.0], &[8000.0], &[6000.0], &[8000.0]];
    // Same thrust on both branches gives identical results
    assert_eq!(
        value(&graph, &inputs, "specific_energy_rate"),
        value(&graph, &inputs, "specific_energy_rate_excess")
    );
    assert_eq!(
        value(&graph, &inputs, "altitude_rate"),
        value(&graph, &inputs, "altitude_rate_max")
    );

    // The excess branch depends on thrust_max_total only
    let eval = graph.evaluate(&inputs).unwrap();
    let ps = graph.signal_id("specific_energy_rate").unwrap();
    let ps_max = graph.signal_id("specific_energy_rate_excess").unwrap();
    assert!(eval.derivative(ps, 5).is_none());
    assert!(eval.derivative(ps_max, 3).is_none());
    assert!(eval.derivative(ps_max, 5).is_some());
}

#[test]
fn infeasible_climb_reported_by_groundspeed() {
    let graph = rates_graph();
    // Huge excess thrust on a light aircraft: Ps > V
    let inputs: [&[Real]; 6] = [&[100.0], &[0.0], &[1.0], &[1.0e5], &[0.0], &[1.0e5]];
    let err = graph.evaluate(&inputs).unwrap_err();
    match err {
        sr_graph::EvalError::Domain { block, source } => {
            assert_eq!(block, "groundspeed");
            assert_eq!(source.node, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn partials_match_central_differences() {
    let graph = rates_graph();
    let base = [700.0, 1.5, 1000.0, 8000.0, 6000.0, 9000.0];
    let typical = [100.0, 1.0, 1e3, 1e4, 1e4, 1e4];
    let slices: Vec<Vec<Real>> = base.iter().map(|&x| vec![x]).collect();
    let refs: Vec<&[Real]> = slices.iter().map(|s| s.as_slice()).collect();
    let eval = graph.evaluate(&refs).unwrap();

    for out in ["specific_energy_rate", "altitude_rate", "range_rate", "altitude_rate_max"] {
        let id = graph.signal_id(out).unwrap();
        for k in 0..base.len() {
            let step = 1e-6 * base[k].abs().max(typical[k]);
            let probe = |delta: Real| {
                let mut x = base;
                x[k] += delta;
                let slices: Vec<Vec<Real>> = x.iter().map(|&v| vec![v]).collect();
                let refs: Vec<&[Real]> = slices.iter().map(|s| s.as_slice()).collect();
                graph.evaluate_values(&refs).unwrap().value(id)[0]
            };
            let fd = (probe(step) - probe(-step)) / (2.0 * step);
            let exact = eval.derivative(id, k).map_or(0.0, |d| d[0]);
            let err = (fd - exact).abs();
            assert!(
                err <= 1e-8 || err <= 1e-7 * exact.abs().max(fd.abs()),
                "d {out} / d input {k}: fd={fd} exact={exact}"
            );
        }
    }
}

proptest! {
    #[test]
    fn kinematic_identity(
        v in 300.0..1500.0f64,
        vdot in -3.0..3.0f64,
        mass in 500.0..3000.0f64,
        thrust in 0.0..20000.0f64,
        drag in 0.0..20000.0f64,
    ) {
        let graph = rates_graph();
        let inputs: [&[Real]; 6] = [&[v], &[vdot], &[mass], &[thrust], &[drag], &[thrust]];
        let eval = graph.evaluate(&inputs);
        // Skip states where the climb rate would exceed the airspeed
        if let Ok(eval) = eval {
            let hdot = eval.value(graph.signal_id("altitude_rate").unwrap())[0];
            let r = eval.value(graph.signal_id("range_rate").unwrap())[0];
            prop_assert!((r * r + hdot * hdot - v * v).abs() <= 1e-9 * v * v);
        }
    }

    #[test]
    fn envelope_ordering(
        v in 300.0..1500.0f64,
        mass in 500.0..3000.0f64,
        thrust in 0.0..20000.0f64,
        margin in 0.0..10000.0f64,
        drag in 0.0..20000.0f64,
    ) {
        let graph = rates_graph();
        let inputs: [&[Real]; 6] = [&[v], &[0.0], &[mass], &[thrust], &[drag], &[thrust + margin]];
        let eval = graph.evaluate_values(&inputs);
        if let Ok(eval) = eval {
            let ps = eval.value(graph.signal_id("specific_energy_rate").unwrap())[0];
            let ps_max = eval.value(graph.signal_id("specific_energy_rate_excess").unwrap())[0];
            prop_assert!(ps_max >= ps);
            let hdot = eval.value(graph.signal_id("altitude_rate").unwrap())[0];
            let hdot_max = eval.value(graph.signal_id("altitude_rate_max").unwrap())[0];
            prop_assert!(hdot_max >= hdot);
        }
    }
}
