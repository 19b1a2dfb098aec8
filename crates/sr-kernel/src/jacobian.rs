//! Per-node partial derivatives of every output w.r.t. every input.
//!
//! Nodes are independent, so each (output, input) block of the full Jacobian is
//! diagonal and stored as a single `NodeBatch`. Pairs with no dependency are
//! absent.

use std::collections::BTreeMap;

use nalgebra::DMatrix;
use sr_core::{NodeBatch, Real};

#[derive(Debug, Clone, PartialEq)]
pub struct Jacobian {
    num_nodes: usize,
    outputs: Vec<&'static str>,
    inputs: Vec<&'static str>,
    entries: BTreeMap<(usize, usize), NodeBatch>,
}

impl Jacobian {
    pub fn new(num_nodes: usize, outputs: Vec<&'static str>, inputs: Vec<&'static str>) -> Self {
        Self {
            num_nodes,
            outputs,
            inputs,
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, output: usize, input: usize, values: NodeBatch) {
        debug_assert_eq!(values.len(), self.num_nodes);
        self.entries.insert((output, input), values);
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn outputs(&self) -> &[&'static str] {
        &self.outputs
    }

    pub fn inputs(&self) -> &[&'static str] {
        &self.inputs
    }

    /// d output / d input per node; `None` when structurally zero or unknown.
    pub fn partial(&self, output: &str, input: &str) -> Option<&NodeBatch> {
        let o = self.outputs.iter().position(|&n| n == output)?;
        let i = self.inputs.iter().position(|&n| n == input)?;
        self.entries.get(&(o, i))
    }

    /// Like `partial`, with structural zeros filled in.
    pub fn partial_or_zero(&self, output: &str, input: &str) -> NodeBatch {
        self.partial(output, input)
            .cloned()
            .unwrap_or_else(|| NodeBatch::zeros(self.num_nodes))
    }

    /// Nonzero (output, input) pairs.
    pub fn nonzero(&self) -> impl Iterator<Item = (&'static str, &'static str, &NodeBatch)> + '_ {
        self.entries
            .iter()
            .map(|(&(o, i), v)| (self.outputs[o], self.inputs[i], v))
    }

    /// Dense matrix with row `output * n + node` and column `input * n + node`.
    pub fn to_dense(&self) -> DMatrix<Real> {
        let n = self.num_nodes;
        let mut dense = DMatrix::zeros(self.outputs.len() * n, self.inputs.len() * n);
        for (&(o, i), values) in &self.entries {
            for (node, &v) in values.iter().enumerate() {
                dense[(o * n + node, i * n + node)] = v;
            }
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_layout_is_block_diagonal() {
        let mut jac = Jacobian::new(2, vec!["a", "b"], vec!["x", "y", "z"]);
        jac.insert(1, 2, vec![3.0, 4.0].into());
        let dense = jac.to_dense();
        assert_eq!(dense.shape(), (4, 6));
        assert_eq!(dense[(2, 4)], 3.0);
        assert_eq!(dense[(3, 5)], 4.0);
        assert_eq!(dense[(2, 5)], 0.0);
        assert_eq!(dense.iter().filter(|v| **v != 0.0).count(), 2);
    }

    #[test]
    fn missing_partial_is_zero() {
        let mut jac = Jacobian::new(1, vec!["a"], vec!["x", "y"]);
        jac.insert(0, 0, vec![1.5].into());
        assert_eq!(jac.partial("a", "x").unwrap()[0], 1.5);
        assert!(jac.partial("a", "y").is_none());
        assert!(jac.partial("q", "x").is_none());
        assert_eq!(jac.partial_or_zero("a", "y").as_slice(), &[0.0]);
        assert_eq!(jac.nonzero().count(), 1);
    }
}
