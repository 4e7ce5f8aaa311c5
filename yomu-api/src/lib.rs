//! Public API for yomu streaming Japanese tokenization
//!
//! This crate provides a stable interface over the engine: configuration,
//! serializable output types and a tokenizer that accepts text, bytes,
//! readers or files.
//!
//! ```rust
//! let output = yomu_api::process_text("晴れ。雨。").unwrap();
//! assert_eq!(output.sentences.len(), 2);
//! assert_eq!(output.sentences[1].text, "雨。");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use error::Result;
use std::time::Instant;
use yomu_engine::{InputSource, SplitMode, Tokenizer, TokenizerIter};

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{Metadata, MorphemeDto, Output, SentenceDto};
pub use error::ApiError;
pub use yomu_engine::Input;

/// Main entry point for tokenization
///
/// Wraps the engine tokenizer and converts its results into DTOs.
#[derive(Debug)]
pub struct SentenceTokenizer {
    inner: Tokenizer,
    config: Config,
}

impl SentenceTokenizer {
    /// Create a tokenizer with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a tokenizer with a custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let inner = Tokenizer::builder()
            .config(config.tokenizer_config().clone())
            .build()?;
        Ok(Self { inner, config })
    }

    /// Tokenize all sentences of `input` with the configured split mode
    pub fn process(&self, input: Input) -> Result<Output> {
        self.process_with_mode(input, self.config.split_mode())
    }

    /// Tokenize all sentences of `input` with an explicit split mode
    pub fn process_with_mode(&self, input: Input, mode: SplitMode) -> Result<Output> {
        let start = Instant::now();

        let mut sentences = Vec::new();
        for morphemes in self.inner.input_iter(mode, input) {
            sentences.push(SentenceDto::from_morphemes(&morphemes?));
        }

        let metadata = Metadata {
            total_chars: sentences.iter().map(SentenceDto::len).sum(),
            sentence_count: sentences.len(),
            morpheme_count: sentences.iter().map(|s| s.morphemes.len()).sum(),
            split_mode: mode.to_string(),
            encoding: self.inner.encoding().name().to_string(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        Ok(Output {
            sentences,
            metadata,
        })
    }

    /// Lazy iterator over the sentences of `input`
    ///
    /// Nothing is read until the iterator is advanced. A read fault is
    /// reported once, after which the iterator ends.
    pub fn sentences(&self, input: Input) -> Sentences<'_> {
        Sentences {
            inner: self.inner.input_iter(self.config.split_mode(), input),
        }
    }

    /// Process text directly (convenience method)
    pub fn process_text(&self, text: &str) -> Result<Output> {
        self.process(Input::from_text(text))
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Lazy sentence iterator returned by [`SentenceTokenizer::sentences`]
#[derive(Debug)]
pub struct Sentences<'a> {
    inner: TokenizerIter<'a, InputSource>,
}

impl Iterator for Sentences<'_> {
    type Item = Result<SentenceDto>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|sentence| {
            sentence
                .map(|morphemes| SentenceDto::from_morphemes(&morphemes))
                .map_err(ApiError::from)
        })
    }
}

impl std::iter::FusedIterator for Sentences<'_> {}

// Convenience functions

/// Process text with default configuration
pub fn process_text(text: &str) -> Result<Output> {
    let tokenizer = SentenceTokenizer::new()?;
    tokenizer.process(Input::from_text(text))
}

/// Process a file with default configuration
pub fn process_file<P: AsRef<std::path::Path>>(path: P) -> Result<Output> {
    let tokenizer = SentenceTokenizer::new()?;
    tokenizer.process(Input::from_file(path.as_ref().to_path_buf()))
}
