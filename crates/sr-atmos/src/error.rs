//! Error types for atmosphere and airspeed models.

use sr_core::{DomainError, SrError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AtmosError {
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type AtmosResult<T> = Result<T, AtmosError>;

impl From<AtmosError> for SrError {
    fn from(e: AtmosError) -> Self {
        match e {
            AtmosError::Configuration { what } => SrError::Configuration { what },
            AtmosError::Domain(d) => SrError::Domain(d),
        }
    }
}
