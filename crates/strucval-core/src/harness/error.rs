use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("A test provider named '{0}' is already registered")]
    DuplicateProvider(String),

    #[error("Unknown test '{name}'. Available: {available}")]
    UnknownProvider { name: String, available: String },
}
