//! Japanese sentence detection and tokenization on top of `yomu-stream`
//!
//! This crate provides the concrete collaborators of the streaming pipeline:
//! a rule-based sentence detector, a dictionary-free reference analyzer,
//! decoded text sources and the [`Tokenizer`] facade that binds them to a
//! configuration.
//!
//! ```rust
//! use yomu_engine::{SplitMode, Tokenizer};
//!
//! let tokenizer = Tokenizer::new();
//! let sentences = tokenizer
//!     .tokenize_sentences(SplitMode::C, "東京へ行く。京都へ行く。")
//!     .unwrap();
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[1][0].surface(), "京都");
//! ```

#![warn(missing_docs)]

pub mod analyzer;
pub mod config;
pub mod detector;
pub mod error;
pub mod input;
pub mod tokenizer;

// Re-export key types
pub use analyzer::{CharCategory, CharClassAnalyzer};
pub use config::{TokenizerConfig, MAX_SENTENCE_LIMIT};
pub use detector::{NonBreakChecker, SentenceDetector, WordListChecker, DEFAULT_LIMIT};
pub use error::{EngineError, Result};
pub use input::{encoding_for_label, Input, InputSource, ReaderSource, StrSource};
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerIter};

// Re-export from the pipeline for convenience
pub use yomu_stream::{
    Analyzer, CharSource, Morpheme, MorphemeList, Pull, SentenceIter, SplitMode, StreamError,
};
