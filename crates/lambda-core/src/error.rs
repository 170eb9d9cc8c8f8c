//! Error types for Lambda ID parsing

use thiserror::Error;

/// Core Lambda ID errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LambdaError {
    #[error("Invalid Lambda ID format: {0}")]
    InvalidFormat(String),

    #[error("Tier out of range: {0}")]
    TierOutOfRange(u8),

    #[error("Invalid hash component: {0:?}")]
    InvalidHashComponent(String),

    #[error("Symbol must be a single character, got {0:?}")]
    InvalidSymbol(String),
}

/// Result type for Lambda ID operations
pub type LambdaResult<T> = Result<T, LambdaError>;
