//! Error taxonomy for the streaming pipeline

use std::error::Error as StdError;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Boxed error returned by collaborators (analyzers)
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors raised by a sentence iterator
///
/// Every variant except [`StreamError::Exhausted`] is terminal for the
/// iterator that produced it. The error is `Clone` so that a failed iterator
/// can hand the same fault to every later caller.
#[derive(Error, Debug, Clone)]
pub enum StreamError {
    /// The character source failed
    #[error("failed to read from source after {offset} characters")]
    SourceRead {
        /// Number of characters successfully read before the fault
        offset: usize,
        /// The fault raised by the source
        #[source]
        source: Arc<io::Error>,
    },

    /// `next` was called with no sentence left
    #[error("no texts left to analyze")]
    Exhausted,

    /// The source was driven with, or answered with, malformed parameters
    #[error("invalid source usage: {reason}")]
    InvalidSourceUsage {
        /// What was violated
        reason: String,
    },

    /// The segmenter confirmed a boundary outside the window it was given
    #[error("segmenter confirmed boundary {offset} in a window of {window} characters")]
    InvalidBoundary {
        /// The offending boundary
        offset: usize,
        /// Window length at the time
        window: usize,
    },

    /// The analyzer failed on a sentence
    #[error("analysis failed for sentence {begin}..{end}")]
    Analyzer {
        /// Global begin offset of the sentence
        begin: usize,
        /// Global end offset of the sentence
        end: usize,
        /// The analyzer's error
        #[source]
        source: Arc<dyn StdError + Send + Sync>,
    },

    /// The analyzer returned morphemes that do not partition the sentence
    #[error("analysis of sentence {begin}..{end} is malformed: {reason}")]
    InvalidAnalysis {
        /// Global begin offset of the sentence
        begin: usize,
        /// Global end offset of the sentence
        end: usize,
        /// Which part of the coverage invariant failed
        reason: String,
    },
}

impl StreamError {
    /// Create a source read error
    pub fn source_read(offset: usize, err: io::Error) -> Self {
        StreamError::SourceRead {
            offset,
            source: Arc::new(err),
        }
    }

    /// Create an invalid source usage error
    pub fn invalid_usage(reason: impl Into<String>) -> Self {
        StreamError::InvalidSourceUsage {
            reason: reason.into(),
        }
    }

    /// True for the expected end-of-iteration signal
    pub fn is_exhausted(&self) -> bool {
        matches!(self, StreamError::Exhausted)
    }

    /// True if the underlying source failed
    pub fn is_source_fault(&self) -> bool {
        matches!(self, StreamError::SourceRead { .. })
    }
}

/// Result type for streaming operations
pub type Result<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_read_keeps_origin() {
        let err = StreamError::source_read(500, io::Error::other("All data used."));
        assert!(err.is_source_fault());
        assert!(!err.is_exhausted());

        let origin = err.source().expect("source error should be chained");
        assert_eq!(origin.to_string(), "All data used.");
        assert_eq!(
            err.to_string(),
            "failed to read from source after 500 characters"
        );
    }

    #[test]
    fn test_clone_shares_fault() {
        let err = StreamError::source_read(0, io::Error::other("broken"));
        let cloned = err.clone();
        match (err, cloned) {
            (
                StreamError::SourceRead { source: a, .. },
                StreamError::SourceRead { source: b, .. },
            ) => assert!(Arc::ptr_eq(&a, &b)),
            _ => panic!("Expected SourceRead errors"),
        }
    }
}
