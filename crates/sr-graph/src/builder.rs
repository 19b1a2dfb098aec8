//! Incremental wiring builder.

use std::collections::HashMap;

use sr_core::{BlockId, SignalId};

use crate::binding::BindingTable;
use crate::block::Block;
use crate::error::GraphError;
use crate::graph::{BlockGraph, BlockNode, SignalInfo};
use crate::validate;

struct PendingBlock {
    name: String,
    block: Box<dyn Block>,
    bindings: BindingTable,
}

/// Builder for wiring blocks together.
///
/// Declare graph inputs with `add_input`, instantiate blocks with `add_block`,
/// then call `build()` to validate and freeze the wiring into a `BlockGraph`.
#[derive(Default)]
pub struct WiringBuilder {
    inputs: Vec<String>,
    blocks: Vec<PendingBlock>,
}

impl WiringBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an externally supplied signal. Returns its position among the inputs.
    pub fn add_input(&mut self, name: impl Into<String>) -> usize {
        self.inputs.push(name.into());
        self.inputs.len() - 1
    }

    /// Instantiate a block under `name` with the given port bindings.
    pub fn add_block(
        &mut self,
        name: impl Into<String>,
        block: impl Block + 'static,
        bindings: BindingTable,
    ) -> BlockId {
        let id = BlockId::from_index(self.blocks.len() as u32);
        self.blocks.push(PendingBlock {
            name: name.into(),
            block: Box::new(block),
            bindings,
        });
        id
    }

    /// Validate the wiring and compute the evaluation order.
    pub fn build(self) -> Result<BlockGraph, GraphError> {
        let mut signals: Vec<SignalInfo> = Vec::new();
        let mut by_name: HashMap<String, SignalId> = HashMap::new();

        // Graph inputs take the first signal slots
        let mut inputs = Vec::with_capacity(self.inputs.len());
        for name in &self.inputs {
            if by_name.contains_key(name) {
                return Err(GraphError::DuplicateSignal { name: name.clone() });
            }
            let id = SignalId::from_index(signals.len() as u32);
            signals.push(SignalInfo {
                id,
                name: name.clone(),
                producer: None,
            });
            by_name.insert(name.clone(), id);
            inputs.push(id);
        }

        // Register block outputs
        let mut block_names: HashMap<&str, BlockId> = HashMap::new();
        let mut output_signals = Vec::with_capacity(self.blocks.len());
        for (index, pending) in self.blocks.iter().enumerate() {
            let block_id = BlockId::from_index(index as u32);
            if block_names.insert(&pending.name, block_id).is_some() {
                return Err(GraphError::DuplicateBlock {
                    name: pending.name.clone(),
                });
            }
            validate::check_bindings(&pending.name, pending.block.as_ref(), &pending.bindings)?;

            let mut outs = Vec::with_capacity(pending.block.outputs().len());
            for port in pending.block.outputs() {
                let external = pending.bindings.resolve(port);
                if by_name.contains_key(external) {
                    return Err(GraphError::DuplicateProducer {
                        signal: external.to_string(),
                        block: pending.name.clone(),
                    });
                }
                let id = SignalId::from_index(signals.len() as u32);
                signals.push(SignalInfo {
                    id,
                    name: external.to_string(),
                    producer: Some(block_id),
                });
                by_name.insert(external.to_string(), id);
                outs.push(id);
            }
            output_signals.push(outs);
        }

        // Resolve block inputs
        let mut input_signals = Vec::with_capacity(self.blocks.len());
        for pending in &self.blocks {
            let mut ins = Vec::with_capacity(pending.block.inputs().len());
            for port in pending.block.inputs() {
                let external = pending.bindings.resolve(port);
                let id = by_name.get(external).copied().ok_or_else(|| {
                    GraphError::UnresolvedInput {
                        block: pending.name.clone(),
                        port: port.to_string(),
                        signal: external.to_string(),
                    }
                })?;
                ins.push(id);
            }
            input_signals.push(ins);
        }

        let order = validate::evaluation_order(&signals, &input_signals, |i| {
            self.blocks[i].name.clone()
        })?;

        let blocks: Vec<BlockNode> = self
            .blocks
            .into_iter()
            .zip(input_signals)
            .zip(output_signals)
            .enumerate()
            .map(|(index, ((pending, ins), outs))| BlockNode {
                id: BlockId::from_index(index as u32),
                name: pending.name,
                block: pending.block,
                input_signals: ins,
                output_signals: outs,
            })
            .collect();

        tracing::debug!(
            order = ?order.iter().map(|id| blocks[id.slot()].name.as_str()).collect::<Vec<_>>(),
            signals = signals.len(),
            "block graph built"
        );

        Ok(BlockGraph {
            signals,
            inputs,
            blocks,
            order,
        })
    }
}
