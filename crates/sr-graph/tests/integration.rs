//! Integration tests for sr-graph.

use proptest::prelude::*;
use sr_core::{DomainError, Real};
use sr_graph::{BindingTable, Block, EvalError, GraphError, Partials, WiringBuilder};

/// y = x0 * x1
struct Product;

impl Block for Product {
    fn kind(&self) -> &'static str {
        "Product"
    }
    fn inputs(&self) -> &[&'static str] {
        &["lhs", "rhs"]
    }
    fn outputs(&self) -> &[&'static str] {
        &["product"]
    }
    fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError> {
        for i in 0..outputs[0].len() {
            outputs[0][i] = inputs[0][i] * inputs[1][i];
        }
        Ok(())
    }
    fn compute_partials(&self, inputs: &[&[Real]], partials: &mut Partials) -> Result<(), DomainError> {
        partials.fill(0, 0, |i| inputs[1][i]);
        partials.fill(0, 1, |i| inputs[0][i]);
        Ok(())
    }
}

/// y = sqrt(x), rejecting negative x
struct Root;

impl Block for Root {
    fn kind(&self) -> &'static str {
        "Root"
    }
    fn inputs(&self) -> &[&'static str] {
        &["value"]
    }
    fn outputs(&self) -> &[&'static str] {
        &["root"]
    }
    fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError> {
        for (i, &x) in inputs[0].iter().enumerate() {
            if x < 0.0 {
                return Err(DomainError::new("negative radicand", i, x));
            }
            outputs[0][i] = x.sqrt();
        }
        Ok(())
    }
    fn compute_partials(&self, inputs: &[&[Real]], partials: &mut Partials) -> Result<(), DomainError> {
        partials.fill(0, 0, |i| 0.5 / inputs[0][i].sqrt());
        Ok(())
    }
}

#[test]
fn same_block_type_instantiated_twice_with_renamed_ports() {
    // area = a * b ; volume = area * c ; side = sqrt(area)
    let mut builder = WiringBuilder::new();
    builder.add_input("a");
    builder.add_input("b");
    builder.add_input("c");
    builder.add_block(
        "volume",
        Product,
        BindingTable::new()
            .bind("lhs", "area")
            .bind("rhs", "c")
            .bind("product", "volume"),
    );
    builder.add_block(
        "area",
        Product,
        BindingTable::new().bind("lhs", "a").bind("rhs", "b").bind("product", "area"),
    );
    builder.add_block("side", Root, BindingTable::new().bind("value", "area").bind("root", "side"));

    let graph = builder.build().unwrap();
    let names: Vec<&str> = graph
        .evaluation_order()
        .iter()
        .map(|id| graph.blocks()[id.slot()].name.as_str())
        .collect();
    assert_eq!(names, vec!["area", "volume", "side"]);

    let a = [2.0, 3.0];
    let b = [8.0, 3.0];
    let c = [0.5, 2.0];
    let eval = graph.evaluate(&[&a, &b, &c]).unwrap();

    let volume = graph.signal_id("volume").unwrap();
    let side = graph.signal_id("side").unwrap();
    assert_eq!(eval.value(volume).as_slice(), &[8.0, 18.0]);
    assert_eq!(eval.value(side).as_slice(), &[4.0, 3.0]);

    // d volume / d a = b * c
    assert_eq!(eval.derivative(volume, 0).unwrap().as_slice(), &[4.0, 6.0]);
    // d side / d b = a / (2 sqrt(a b))
    let dside_db = eval.derivative(side, 1).unwrap();
    assert!((dside_db[0] - 2.0 / 8.0).abs() < 1e-15);
    // side does not depend on c
    assert!(eval.derivative(side, 2).is_none());
}

#[test]
fn unresolved_input_rejected() {
    let mut builder = WiringBuilder::new();
    builder.add_input("a");
    builder.add_block("p", Product, BindingTable::new().bind("lhs", "a").bind("rhs", "missing"));
    match builder.build() {
        Err(GraphError::UnresolvedInput { signal, .. }) => assert_eq!(signal, "missing"),
        other => panic!("expected unresolved input, got {other:?}"),
    }
}

#[test]
fn binding_unknown_port_rejected() {
    let mut builder = WiringBuilder::new();
    builder.add_input("value");
    builder.add_block("r", Root, BindingTable::new().bind("radicand", "value"));
    assert!(matches!(builder.build(), Err(GraphError::UnknownPort { .. })));
}

#[test]
fn cycle_rejected() {
    let mut builder = WiringBuilder::new();
    builder.add_block("r1", Root, BindingTable::new().bind("value", "x").bind("root", "y"));
    builder.add_block("r2", Root, BindingTable::new().bind("value", "y").bind("root", "x"));
    assert!(matches!(builder.build(), Err(GraphError::Cycle { .. })));
}

#[test]
fn shape_mismatch_reported() {
    let mut builder = WiringBuilder::new();
    builder.add_input("value");
    builder.add_block("r", Root, BindingTable::new());
    let graph = builder.build().unwrap();

    let err = graph.evaluate(&[]).unwrap_err();
    assert!(matches!(err, EvalError::Shape { .. }));
}

#[test]
fn domain_error_names_block_and_node() {
    let mut builder = WiringBuilder::new();
    builder.add_input("value");
    builder.add_block("r", Root, BindingTable::new());
    let graph = builder.build().unwrap();

    let err = graph.evaluate(&[&[4.0, -1.0, 9.0]]).unwrap_err();
    match err {
        EvalError::Domain { block, source } => {
            assert_eq!(block, "r");
            assert_eq!(source.node, 1);
        }
        other => panic!("unexpected: {other}"),
    }
}

#[test]
fn parallel_domain_error_reports_global_node() {
    let mut builder = WiringBuilder::new();
    builder.add_input("value");
    builder.add_block("r", Root, BindingTable::new());
    let graph = builder.build().unwrap();

    let mut data = vec![1.0; 40];
    data[27] = -3.0;
    data[35] = -1.0;
    let err = graph.evaluate_par(&[&data], 8).unwrap_err();
    match err {
        EvalError::Domain { source, .. } => assert_eq!(source.node, 27),
        other => panic!("unexpected: {other}"),
    }
}

proptest! {
    #[test]
    fn parallel_matches_serial(
        xs in prop::collection::vec(0.1_f64..100.0, 1..64),
        chunk in 1_usize..17,
    ) {
        let mut builder = WiringBuilder::new();
        builder.add_input("x");
        builder.add_input("y");
        builder.add_block("p", Product, BindingTable::new().bind("lhs", "x").bind("rhs", "y"));
        builder.add_block("r", Root, BindingTable::new().bind("value", "product"));
        let graph = builder.build().unwrap();

        let ys: Vec<f64> = xs.iter().map(|x| x + 1.0).collect();
        let serial = graph.evaluate(&[&xs, &ys]).unwrap();
        let parallel = graph.evaluate_par(&[&xs, &ys], chunk).unwrap();

        let root = graph.signal_id("root").unwrap();
        prop_assert_eq!(serial.len(), parallel.len());
        prop_assert_eq!(serial.value(root), parallel.value(root));
        prop_assert_eq!(serial.derivative(root, 0), parallel.derivative(root, 0));
        prop_assert_eq!(serial.derivative(root, 1), parallel.derivative(root, 1));
    }
}
