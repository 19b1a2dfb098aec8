//! Validated, immutable block graph.

use sr_core::{BlockId, SignalId};

use crate::block::Block;

/// A named value flowing between blocks (one `NodeBatch` per evaluation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalInfo {
    pub id: SignalId,
    pub name: String,
    /// Block producing this signal; `None` for graph inputs.
    pub producer: Option<BlockId>,
}

/// A block instance together with its resolved wiring.
pub struct BlockNode {
    pub id: BlockId,
    pub name: String,
    pub block: Box<dyn Block>,
    /// Signal bound to each internal input port, in port order.
    pub input_signals: Vec<SignalId>,
    /// Signal bound to each internal output port, in port order.
    pub output_signals: Vec<SignalId>,
}

impl std::fmt::Debug for BlockNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.block.kind())
            .field("input_signals", &self.input_signals)
            .field("output_signals", &self.output_signals)
            .finish()
    }
}

/// The graph: blocks, signals and a fixed evaluation order.
///
/// Built once by `WiringBuilder::build`; evaluation borrows it immutably, so a
/// single graph can serve concurrent callers.
#[derive(Debug)]
pub struct BlockGraph {
    pub(crate) signals: Vec<SignalInfo>,
    pub(crate) inputs: Vec<SignalId>,
    pub(crate) blocks: Vec<BlockNode>,
    pub(crate) order: Vec<BlockId>,
}

impl BlockGraph {
    /// All signals, indexed by `SignalId`.
    pub fn signals(&self) -> &[SignalInfo] {
        &self.signals
    }

    /// Graph inputs in declaration order.
    pub fn inputs(&self) -> &[SignalId] {
        &self.inputs
    }

    /// All blocks, indexed by `BlockId`.
    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    /// Blocks in evaluation order.
    pub fn evaluation_order(&self) -> &[BlockId] {
        &self.order
    }

    pub fn signal(&self, id: SignalId) -> Option<&SignalInfo> {
        self.signals.get(id.slot())
    }

    pub fn signal_id(&self, name: &str) -> Option<SignalId> {
        self.signals.iter().find(|s| s.name == name).map(|s| s.id)
    }

    /// Position of a signal among the graph inputs.
    pub fn input_index(&self, name: &str) -> Option<usize> {
        let id = self.signal_id(name)?;
        self.inputs.iter().position(|&i| i == id)
    }

    pub fn block(&self, name: &str) -> Option<&BlockNode> {
        self.blocks.iter().find(|b| b.name == name)
    }
}
