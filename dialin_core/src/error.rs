use thiserror::Error;

use crate::validation::ValidationErrors;

/// Failure of a single calibration call. A call either returns a complete
/// result or fails as a whole with one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("invalid brew parameters: {0}")]
    Invalid(ValidationErrors),
    #[error("invalid grind scale: {0}")]
    InvalidScale(ValidationErrors),
}

impl CalibrationError {
    /// Field-level reasons behind the failure.
    pub fn fields(&self) -> &ValidationErrors {
        match self {
            CalibrationError::Invalid(v) | CalibrationError::InvalidScale(v) => v,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("invalid calibration policy: {0}")]
    InvalidPolicy(ValidationErrors),
    #[error("invalid grind scale: {0}")]
    InvalidGrindScale(ValidationErrors),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown roast level '{0}' (expected light, medium, dark or a 0-100 percentage)")]
pub struct ParseRoastError(pub String);

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
