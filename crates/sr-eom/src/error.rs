//! Error types for rate component construction.

use sr_core::error::SrError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EomError {
    #[error("Non-physical parameter: {what} = {value}")]
    NonPhysical { what: &'static str, value: f64 },
}

pub type EomResult<T> = Result<T, EomError>;

impl From<EomError> for SrError {
    fn from(e: EomError) -> Self {
        match e {
            EomError::NonPhysical { what, .. } => SrError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_and_conversion() {
        let err = EomError::NonPhysical {
            what: "gravity",
            value: 0.0,
        };
        assert!(err.to_string().contains("gravity"));
        let sr: SrError = err.into();
        assert!(matches!(sr, SrError::InvalidArg { what: "gravity" }));
    }
}
