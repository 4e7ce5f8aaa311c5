//! Tokenizer configuration
//!
//! Loaded from TOML, every field optional:
//!
//! ```toml
//! split_mode = "B"
//! read_chunk = 4096
//! sentence_limit = 4096
//! encoding = "shift_jis"
//! non_break_words = ["モーニング娘。"]
//! ```

use crate::detector::DEFAULT_LIMIT;
use crate::error::{EngineError, Result};
use crate::input::encoding_for_label;
use serde::{Deserialize, Serialize};
use std::path::Path;
use yomu_stream::{SplitMode, DEFAULT_READ_CHUNK, MAX_READ_CHUNK};

/// Largest accepted `sentence_limit`
pub const MAX_SENTENCE_LIMIT: usize = 1 << 24;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Split mode used by the `*_default` operations
    pub split_mode: SplitMode,
    /// Characters requested from a source per fill
    pub read_chunk: usize,
    /// Maximum characters examined for one sentence
    pub sentence_limit: usize,
    /// Encoding label for byte input
    pub encoding: String,
    /// Words that must never be split by a sentence boundary
    pub non_break_words: Vec<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            split_mode: SplitMode::C,
            read_chunk: DEFAULT_READ_CHUNK,
            sentence_limit: DEFAULT_LIMIT,
            encoding: "utf-8".to_string(),
            non_break_words: Vec::new(),
        }
    }
}

impl TokenizerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TokenizerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check value ranges and the encoding label
    pub fn validate(&self) -> Result<()> {
        if self.read_chunk == 0 || self.read_chunk > MAX_READ_CHUNK {
            return Err(EngineError::Config(format!(
                "read_chunk must be between 1 and {MAX_READ_CHUNK}"
            )));
        }
        if self.sentence_limit == 0 || self.sentence_limit > MAX_SENTENCE_LIMIT {
            return Err(EngineError::Config(format!(
                "sentence_limit must be between 1 and {MAX_SENTENCE_LIMIT}"
            )));
        }
        encoding_for_label(&self.encoding)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = TokenizerConfig::default();
        assert_eq!(config.split_mode, SplitMode::C);
        assert_eq!(config.read_chunk, 4096);
        assert_eq!(config.sentence_limit, 4096);
        assert_eq!(config.encoding, "utf-8");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = TokenizerConfig::from_toml_str(
            r#"
split_mode = "A"
non_break_words = ["モーニング娘。"]
"#,
        )
        .unwrap();
        assert_eq!(config.split_mode, SplitMode::A);
        assert_eq!(config.read_chunk, DEFAULT_READ_CHUNK);
        assert_eq!(config.non_break_words, vec!["モーニング娘。".to_string()]);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            TokenizerConfig::from_toml_str("read_chunk = 0"),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            TokenizerConfig::from_toml_str("sentence_limit = 0"),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            TokenizerConfig::from_toml_str("read_chunk = 2305843009213693951"),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            TokenizerConfig::from_toml_str("sentence_limit = 2305843009213693951"),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            TokenizerConfig::from_toml_str(r#"encoding = "martian""#),
            Err(EngineError::UnknownEncoding { .. })
        ));
        assert!(matches!(
            TokenizerConfig::from_toml_str(r#"split_mode = "D""#),
            Err(EngineError::Toml(_))
        ));
        assert!(matches!(
            TokenizerConfig::from_toml_str("colour = 1"),
            Err(EngineError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "encoding = \"euc-jp\"\nsentence_limit = 128\n").unwrap();

        let config = TokenizerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.encoding, "euc-jp");
        assert_eq!(config.sentence_limit, 128);
    }

    #[test]
    fn test_from_file_nonexistent() {
        match TokenizerConfig::from_file(Path::new("/nonexistent/yomu.toml")) {
            Err(EngineError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
