use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Coordinate arrays differ in length: {test} (test) vs. {reference} (reference)")]
    LengthMismatch { test: usize, reference: usize },

    #[error("Non-finite coordinate for atom {index} of structure '{structure}'")]
    NonFiniteCoordinate { structure: String, index: usize },

    #[error("Singular value decomposition failed: {0}")]
    Decomposition(&'static str),
}
