use thiserror::Error;

use crate::numeric::Real;

pub type SrResult<T> = Result<T, SrError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SrError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A physically infeasible value supplied at one evaluation node.
///
/// `node` is the index within the batch handed to the evaluator.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Domain error at node {node}: {what} (value={value})")]
pub struct DomainError {
    pub what: &'static str,
    pub node: usize,
    pub value: Real,
}

impl DomainError {
    pub fn new(what: &'static str, node: usize, value: Real) -> Self {
        Self { what, node, value }
    }

    /// Shift the node index by `offset` (used when a batch is evaluated in chunks).
    pub fn offset(self, offset: usize) -> Self {
        Self {
            node: self.node + offset,
            ..self
        }
    }
}
