//! Batched evaluation with forward-mode total derivatives.
//!
//! Nodes never interact, so every partial is a per-node diagonal and the total
//! derivative of a signal with respect to a graph input is itself a node batch:
//!
//! ```text
//! d out / d x = sum_j (d out / d in_j) * (d in_j / d x)
//! ```
//!
//! accumulated block by block in evaluation order.

use rayon::prelude::*;
use sr_core::{NodeBatch, Real, SignalId};

use crate::block::Partials;
use crate::error::EvalError;
use crate::graph::BlockGraph;

/// Values of every signal and, optionally, their total derivatives with respect
/// to each graph input.
#[derive(Debug, Clone)]
pub struct Evaluation {
    len: usize,
    values: Vec<NodeBatch>,
    /// `derivs[signal][input]`; `None` means structurally zero.
    derivs: Vec<Vec<Option<NodeBatch>>>,
}

impl Evaluation {
    /// Number of nodes evaluated.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn value(&self, id: SignalId) -> &NodeBatch {
        &self.values[id.slot()]
    }

    /// Total derivative of `of` with respect to graph input number `input`.
    pub fn derivative(&self, of: SignalId, input: usize) -> Option<&NodeBatch> {
        self.derivs
            .get(of.slot())
            .and_then(|row| row.get(input))
            .and_then(Option::as_ref)
    }

    /// Stitch chunk evaluations back together, in order.
    fn concat(parts: Vec<Evaluation>) -> Evaluation {
        let mut parts = parts.into_iter();
        let Some(mut acc) = parts.next() else {
            return Evaluation {
                len: 0,
                values: Vec::new(),
                derivs: Vec::new(),
            };
        };
        for part in parts {
            for (dst, src) in acc.values.iter_mut().zip(&part.values) {
                dst.extend_from(src);
            }
            for (dst_row, src_row) in acc.derivs.iter_mut().zip(&part.derivs) {
                for (dst, src) in dst_row.iter_mut().zip(src_row) {
                    match (dst.as_mut(), src) {
                        (Some(d), Some(s)) => d.extend_from(s),
                        (Some(d), None) => d.extend_from(&NodeBatch::zeros(part.len)),
                        (None, Some(s)) => {
                            let mut filled = NodeBatch::zeros(acc.len);
                            filled.extend_from(s);
                            *dst = Some(filled);
                        }
                        (None, None) => {}
                    }
                }
            }
            acc.len += part.len;
        }
        acc
    }
}

impl BlockGraph {
    /// Evaluate every block on a node batch, propagating total derivatives.
    ///
    /// `inputs` follows the order of `BlockGraph::inputs`; every slice must have
    /// the same length.
    pub fn evaluate(&self, inputs: &[&[Real]]) -> Result<Evaluation, EvalError> {
        self.run(inputs, true)
    }

    /// Evaluate values only (no partials), e.g. for finite-difference probes.
    pub fn evaluate_values(&self, inputs: &[&[Real]]) -> Result<Evaluation, EvalError> {
        self.run(inputs, false)
    }

    /// Evaluate in chunks of at most `chunk` nodes on the rayon pool.
    ///
    /// Results are identical to `evaluate`; domain errors report the
    /// lowest failing node with its batch-global index.
    pub fn evaluate_par(&self, inputs: &[&[Real]], chunk: usize) -> Result<Evaluation, EvalError> {
        let len = self.check_inputs(inputs)?;
        let chunk = chunk.max(1);
        if len <= chunk {
            return self.evaluate(inputs);
        }

        let starts: Vec<usize> = (0..len).step_by(chunk).collect();
        let results: Vec<Result<Evaluation, EvalError>> = starts
            .par_iter()
            .map(|&start| {
                let end = (start + chunk).min(len);
                let sliced: Vec<&[Real]> = inputs.iter().map(|s| &s[start..end]).collect();
                self.evaluate(&sliced).map_err(|e| e.offset(start))
            })
            .collect();

        let parts = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(Evaluation::concat(parts))
    }

    fn check_inputs(&self, inputs: &[&[Real]]) -> Result<usize, EvalError> {
        if inputs.len() != self.inputs.len() {
            return Err(EvalError::Shape {
                what: "graph input count",
                expected: self.inputs.len(),
                actual: inputs.len(),
            });
        }
        let len = inputs.first().map_or(0, |s| s.len());
        for s in inputs {
            if s.len() != len {
                return Err(EvalError::Shape {
                    what: "graph input length",
                    expected: len,
                    actual: s.len(),
                });
            }
        }
        Ok(len)
    }

    fn run(&self, inputs: &[&[Real]], with_derivs: bool) -> Result<Evaluation, EvalError> {
        let len = self.check_inputs(inputs)?;
        let n_graph_inputs = self.inputs.len();

        let mut values: Vec<NodeBatch> = vec![NodeBatch::default(); self.signals.len()];
        let mut derivs: Vec<Vec<Option<NodeBatch>>> = if with_derivs {
            vec![vec![None; n_graph_inputs]; self.signals.len()]
        } else {
            Vec::new()
        };

        for (k, (&id, data)) in self.inputs.iter().zip(inputs).enumerate() {
            values[id.slot()] = NodeBatch::from(*data);
            if with_derivs {
                derivs[id.slot()][k] = Some(NodeBatch::filled(len, 1.0));
            }
        }

        for &block_id in &self.order {
            let node = &self.blocks[block_id.slot()];
            let ins: Vec<&[Real]> = node
                .input_signals
                .iter()
                .map(|id| values[id.slot()].as_slice())
                .collect();

            let mut outs = vec![vec![0.0; len]; node.output_signals.len()];
            node.block
                .compute(&ins, &mut outs)
                .map_err(|source| domain_error(&node.name, source))?;
            for out in &outs {
                if out.len() != len {
                    return Err(EvalError::Shape {
                        what: "block output length",
                        expected: len,
                        actual: out.len(),
                    });
                }
            }

            if with_derivs {
                let mut partials = Partials::new(outs.len(), ins.len(), len);
                node.block
                    .compute_partials(&ins, &mut partials)
                    .map_err(|source| domain_error(&node.name, source))?;

                for (o, &out_id) in node.output_signals.iter().enumerate() {
                    let row: Vec<Option<NodeBatch>> = (0..n_graph_inputs)
                        .map(|k| chain(&partials, o, &node.input_signals, &derivs, k, len))
                        .collect();
                    derivs[out_id.slot()] = row;
                }
            }

            for (&out_id, out) in node.output_signals.iter().zip(outs) {
                values[out_id.slot()] = NodeBatch::from_vec(out);
            }
        }

        Ok(Evaluation {
            len,
            values,
            derivs,
        })
    }
}

fn domain_error(block: &str, source: sr_core::DomainError) -> EvalError {
    tracing::debug!(
        block,
        node = source.node,
        value = source.value,
        what = source.what,
        "domain error"
    );
    EvalError::Domain {
        block: block.to_string(),
        source,
    }
}

/// Sum over block inputs of partial * upstream total derivative.
fn chain(
    partials: &Partials,
    output: usize,
    input_signals: &[SignalId],
    derivs: &[Vec<Option<NodeBatch>>],
    wrt: usize,
    len: usize,
) -> Option<NodeBatch> {
    let mut acc: Option<Vec<Real>> = None;
    for (j, sig) in input_signals.iter().enumerate() {
        let (Some(p), Some(d)) = (partials.get(output, j), derivs[sig.slot()][wrt].as_ref()) else {
            continue;
        };
        let total = acc.get_or_insert_with(|| vec![0.0; len]);
        for ((t, pi), di) in total.iter_mut().zip(p).zip(d.iter()) {
            *t += pi * di;
        }
    }
    acc.map(NodeBatch::from_vec)
}
