//! Core trait for graph blocks.

use sr_core::{DomainError, Real};

/// A pure, node-batched transformation from named input ports to named output ports.
///
/// Blocks are deterministic functions of their inputs and of parameters fixed at
/// construction, suitable for parallel evaluation. Port names are internal to the
/// block; the graph maps them to external signal names through a `BindingTable`,
/// so one block type can be instantiated several times with different wiring.
pub trait Block: Send + Sync {
    /// Block type name for debugging and identification.
    fn kind(&self) -> &'static str;

    /// Internal input port names, in the order `compute` receives them.
    fn inputs(&self) -> &[&'static str];

    /// Internal output port names, in the order `compute` fills them.
    fn outputs(&self) -> &[&'static str];

    /// Compute every output for every node.
    ///
    /// `outputs[k]` arrives zero-filled with the batch length.
    fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError>;

    /// Compute the analytic partial of each output with respect to each input.
    ///
    /// Only nonzero partials need to be written; absent entries are treated as zero.
    fn compute_partials(
        &self,
        inputs: &[&[Real]],
        partials: &mut Partials,
    ) -> Result<(), DomainError>;
}

/// Per-node diagonal partials of a block: entry (output, input) holds
/// d output[i] / d input[i] for each node i.
#[derive(Debug, Clone)]
pub struct Partials {
    n_inputs: usize,
    len: usize,
    entries: Vec<Option<Vec<Real>>>,
}

impl Partials {
    pub fn new(n_outputs: usize, n_inputs: usize, len: usize) -> Self {
        Self {
            n_inputs,
            len,
            entries: vec![None; n_outputs * n_inputs],
        }
    }

    /// Number of nodes in the batch.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store a full column of partials.
    pub fn set(&mut self, output: usize, input: usize, values: Vec<Real>) {
        debug_assert_eq!(values.len(), self.len);
        let slot = output * self.n_inputs + input;
        self.entries[slot] = Some(values);
    }

    /// Fill entry (output, input) node by node.
    pub fn fill(&mut self, output: usize, input: usize, f: impl Fn(usize) -> Real) {
        let values = (0..self.len).map(f).collect();
        self.set(output, input, values);
    }

    /// Mutable access to an entry, zero-initialising it on first use.
    pub fn entry_mut(&mut self, output: usize, input: usize) -> &mut [Real] {
        let len = self.len;
        let slot = output * self.n_inputs + input;
        self.entries[slot].get_or_insert_with(|| vec![0.0; len])
    }

    pub fn get(&self, output: usize, input: usize) -> Option<&[Real]> {
        self.entries[output * self.n_inputs + input].as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partials_absent_until_written() {
        let mut p = Partials::new(2, 3, 4);
        assert!(p.get(1, 2).is_none());
        p.fill(1, 2, |i| i as Real);
        assert_eq!(p.get(1, 2).unwrap(), &[0.0, 1.0, 2.0, 3.0]);
        assert!(p.get(0, 2).is_none());
    }

    #[test]
    fn entry_mut_zero_initialises() {
        let mut p = Partials::new(1, 1, 2);
        p.entry_mut(0, 0)[1] = 5.0;
        assert_eq!(p.get(0, 0).unwrap(), &[0.0, 5.0]);
    }
}
