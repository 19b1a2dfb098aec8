//! Wiring validation and ordering.

use std::collections::BTreeSet;

use sr_core::{BlockId, SignalId};

use crate::binding::BindingTable;
use crate::block::Block;
use crate::error::GraphError;
use crate::graph::SignalInfo;

/// Every explicit binding must name a port the block declares.
pub(crate) fn check_bindings(
    block_name: &str,
    block: &dyn Block,
    bindings: &BindingTable,
) -> Result<(), GraphError> {
    for (internal, _) in bindings.iter() {
        let known = block.inputs().contains(&internal) || block.outputs().contains(&internal);
        if !known {
            return Err(GraphError::UnknownPort {
                block: block_name.to_string(),
                port: internal.to_string(),
            });
        }
    }
    Ok(())
}

/// Compute a topological evaluation order for the blocks.
///
/// Kahn's algorithm; among ready blocks the lowest index goes first, so the
/// order is deterministic and follows insertion order where dependencies allow.
pub(crate) fn evaluation_order(
    signals: &[SignalInfo],
    input_signals: &[Vec<SignalId>],
    name_of: impl Fn(usize) -> String,
) -> Result<Vec<BlockId>, GraphError> {
    let n = input_signals.len();
    let mut downstream: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree = vec![0_usize; n];

    for (consumer, ins) in input_signals.iter().enumerate() {
        for sig in ins {
            if let Some(producer) = signals[sig.slot()].producer {
                downstream[producer.slot()].push(consumer);
                in_degree[consumer] += 1;
            }
        }
    }

    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(next) = ready.pop_first() {
        order.push(BlockId::from_index(next as u32));
        for &consumer in &downstream[next] {
            in_degree[consumer] -= 1;
            if in_degree[consumer] == 0 {
                ready.insert(consumer);
            }
        }
    }

    // Check for cycles
    if order.len() != n {
        let blocks = (0..n).filter(|&i| in_degree[i] > 0).map(name_of).collect();
        return Err(GraphError::Cycle { blocks });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(index: u32, producer: Option<u32>) -> SignalInfo {
        SignalInfo {
            id: SignalId::from_index(index),
            name: format!("s{index}"),
            producer: producer.map(BlockId::from_index),
        }
    }

    #[test]
    fn empty_graph_orders_trivially() {
        let order = evaluation_order(&[], &[], |i| i.to_string()).unwrap();
        assert!(order.is_empty());
    }

    #[test]
    fn two_block_cycle_detected() {
        // block 0 reads s1 (from block 1), block 1 reads s0 (from block 0)
        let signals = vec![signal(0, Some(0)), signal(1, Some(1))];
        let ins = vec![vec![SignalId::from_index(1)], vec![SignalId::from_index(0)]];
        let err = evaluation_order(&signals, &ins, |i| format!("b{i}")).unwrap_err();
        match err {
            GraphError::Cycle { blocks } => assert_eq!(blocks, vec!["b0", "b1"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shared_producer_counted_per_edge() {
        // block 1 reads s0 twice; block 0 produces s0
        let signals = vec![signal(0, Some(0)), signal(1, None)];
        let ins = vec![
            vec![SignalId::from_index(1)],
            vec![SignalId::from_index(0), SignalId::from_index(0)],
        ];
        let order = evaluation_order(&signals, &ins, |i| i.to_string()).unwrap();
        assert_eq!(order, vec![BlockId::from_index(0), BlockId::from_index(1)]);
    }
}
