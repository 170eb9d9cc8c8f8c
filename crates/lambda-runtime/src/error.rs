//! Runtime error types

use lambda_registry::RegistryError;
use thiserror::Error;

/// Fatal generation outcomes. Either way no ID is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No unique candidate after {max_retries} retries")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Collision registry unavailable: {0}")]
    RegistryUnavailable(String),
}

impl From<RegistryError> for GenerationError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Unavailable(reason) => GenerationError::RegistryUnavailable(reason),
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
