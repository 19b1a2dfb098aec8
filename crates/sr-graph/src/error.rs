//! Graph-specific error types.

use sr_core::{DomainError, SrError};
use thiserror::Error;

/// Wiring construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two blocks were registered under the same instance name.
    DuplicateBlock { name: String },

    /// A graph input was declared twice.
    DuplicateSignal { name: String },

    /// A signal is produced by more than one block, or a block output shadows a graph input.
    DuplicateProducer { signal: String, block: String },

    /// A binding names a port the block does not declare.
    UnknownPort { block: String, port: String },

    /// A block input is neither a graph input nor produced by any block.
    UnresolvedInput {
        block: String,
        port: String,
        signal: String,
    },

    /// The blocks listed could not be ordered (they form or depend on a cycle).
    Cycle { blocks: Vec<String> },

    /// Signal name not found.
    UnknownSignal { name: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateBlock { name } => {
                write!(f, "Block '{}' already exists", name)
            }
            GraphError::DuplicateSignal { name } => {
                write!(f, "Graph input '{}' declared twice", name)
            }
            GraphError::DuplicateProducer { signal, block } => {
                write!(
                    f,
                    "Signal '{}' from block '{}' is already produced elsewhere",
                    signal, block
                )
            }
            GraphError::UnknownPort { block, port } => {
                write!(f, "Block '{}' has no port named '{}'", block, port)
            }
            GraphError::UnresolvedInput {
                block,
                port,
                signal,
            } => {
                write!(
                    f,
                    "Input port '{}' of block '{}' is bound to '{}', which nothing provides",
                    port, block, signal
                )
            }
            GraphError::Cycle { blocks } => {
                write!(f, "Blocks form a cycle: {}", blocks.join(", "))
            }
            GraphError::UnknownSignal { name } => {
                write!(f, "Signal '{}' not found", name)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for SrError {
    fn from(err: GraphError) -> Self {
        SrError::Configuration {
            what: err.to_string(),
        }
    }
}

/// Errors raised while evaluating a built graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Shape mismatch: {what} (expected {expected}, got {actual})")]
    Shape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Block '{block}' rejected its inputs: {source}")]
    Domain { block: String, source: DomainError },
}

impl EvalError {
    /// Shift a domain error's node index by `offset`.
    pub(crate) fn offset(self, offset: usize) -> Self {
        match self {
            EvalError::Domain { block, source } => EvalError::Domain {
                block,
                source: source.offset(offset),
            },
            other => other,
        }
    }
}

impl From<EvalError> for SrError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::Shape { what, .. } => SrError::InvalidArg { what },
            EvalError::Domain { source, .. } => SrError::Domain(source),
        }
    }
}
