//! High-level configuration API

use crate::error::{ApiError, Result};
use std::path::Path;
use yomu_engine::{SplitMode, TokenizerConfig};

/// High-level configuration for tokenization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    inner: TokenizerConfig,
}

impl Config {
    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let inner = TokenizerConfig::from_file(path.as_ref())?;
        Ok(Self { inner })
    }

    /// Default split mode
    pub fn split_mode(&self) -> SplitMode {
        self.inner.split_mode
    }

    /// Encoding label for byte input
    pub fn encoding(&self) -> &str {
        &self.inner.encoding
    }

    /// Underlying engine configuration
    pub fn tokenizer_config(&self) -> &TokenizerConfig {
        &self.inner
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the split mode by name (`A`, `B` or `C`)
    pub fn split_mode(mut self, mode: &str) -> Result<Self> {
        self.config.inner.split_mode = mode.parse().map_err(ApiError::Config)?;
        Ok(self)
    }

    /// Set the characters requested per fill
    pub fn read_chunk(mut self, read_chunk: usize) -> Self {
        self.config.inner.read_chunk = read_chunk;
        self
    }

    /// Set the maximum sentence length
    pub fn sentence_limit(mut self, limit: usize) -> Self {
        self.config.inner.sentence_limit = limit;
        self
    }

    /// Set the encoding label for byte input
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.config.inner.encoding = label.into();
        self
    }

    /// Add a word a sentence boundary must not split
    pub fn non_break_word(mut self, word: impl Into<String>) -> Self {
        self.config.inner.non_break_words.push(word.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config
            .inner
            .validate()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = Config::builder()
            .split_mode("b")
            .unwrap()
            .read_chunk(128)
            .non_break_word("モーニング娘。")
            .build()
            .unwrap();
        assert_eq!(config.split_mode(), SplitMode::B);
        assert_eq!(config.tokenizer_config().read_chunk, 128);
        assert_eq!(config.encoding(), "utf-8");
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(matches!(
            Config::builder().split_mode("Z"),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            Config::builder().sentence_limit(0).build(),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            Config::builder().encoding("martian").build(),
            Err(ApiError::Config(_))
        ));
    }
}
