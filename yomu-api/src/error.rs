//! API error types

use thiserror::Error;
use yomu_engine::{EngineError, StreamError};

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Engine error
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<StreamError> for ApiError {
    fn from(err: StreamError) -> Self {
        ApiError::Engine(EngineError::Stream(err))
    }
}

impl ApiError {
    /// True if the source failed while reading
    pub fn is_source_fault(&self) -> bool {
        matches!(self, ApiError::Engine(EngineError::Stream(e)) if e.is_source_fault())
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
