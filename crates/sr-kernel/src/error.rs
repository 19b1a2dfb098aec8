//! Kernel error types.

use sr_atmos::AtmosError;
use sr_core::{DomainError, SrError};
use sr_eom::EomError;
use sr_graph::{EvalError, GraphError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum KernelError {
    /// Invalid options, rejected at construction.
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    /// A configuration file could not be read or parsed.
    #[error("Config file error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wiring error: {0}")]
    Graph(#[from] GraphError),

    #[error("Block '{block}' rejected its inputs: {source}")]
    Domain { block: String, source: DomainError },

    #[error("Shape mismatch: {what} (expected {expected}, got {actual})")]
    Shape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// The underlying domain error, if this is one.
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            KernelError::Domain { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<EvalError> for KernelError {
    fn from(e: EvalError) -> Self {
        match e {
            EvalError::Shape {
                what,
                expected,
                actual,
            } => KernelError::Shape {
                what,
                expected,
                actual,
            },
            EvalError::Domain { block, source } => KernelError::Domain { block, source },
        }
    }
}

impl From<AtmosError> for KernelError {
    fn from(e: AtmosError) -> Self {
        match e {
            AtmosError::Configuration { what } => KernelError::Configuration { what },
            AtmosError::Domain(source) => KernelError::Domain {
                block: "atmosphere".to_string(),
                source,
            },
        }
    }
}

impl From<EomError> for KernelError {
    fn from(e: EomError) -> Self {
        KernelError::Configuration {
            what: e.to_string(),
        }
    }
}

impl From<KernelError> for SrError {
    fn from(e: KernelError) -> Self {
        match e {
            KernelError::Domain { source, .. } => SrError::Domain(source),
            KernelError::Shape { what, .. } => SrError::InvalidArg { what },
            other => SrError::Configuration {
                what: other.to_string(),
            },
        }
    }
}
