//! Error types for the fact verifier

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, VerifierError>;

/// Errors that can abort a verification run
///
/// Query failures never show up here: the SPARQL client turns them into
/// negative answers at the executor boundary.
#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<::config::ConfigError> for VerifierError {
    fn from(err: ::config::ConfigError) -> Self {
        VerifierError::Configuration(err.to_string())
    }
}
