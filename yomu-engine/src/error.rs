//! Engine error types

use thiserror::Error;
use yomu_stream::StreamError;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Streaming pipeline error
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Unknown text encoding label
    #[error("unknown encoding '{label}'")]
    UnknownEncoding {
        /// The label that was not recognized
        label: String,
    },

    /// I/O error outside the streaming pipeline
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl EngineError {
    /// True if the underlying error is a stream exhaustion
    pub fn is_exhausted(&self) -> bool {
        matches!(self, EngineError::Stream(e) if e.is_exhausted())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
