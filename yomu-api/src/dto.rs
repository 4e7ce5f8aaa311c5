//! Data Transfer Objects for API

use yomu_stream::Morpheme;

/// Morpheme information for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MorphemeDto {
    /// Character offset of the first character
    pub begin: usize,
    /// Character offset one past the last character
    pub end: usize,
    /// Text of the morpheme
    pub surface: String,
    /// Analyzer-defined category
    pub category: String,
}

impl From<&Morpheme> for MorphemeDto {
    fn from(m: &Morpheme) -> Self {
        Self {
            begin: m.begin(),
            end: m.end(),
            surface: m.surface().to_string(),
            category: m.category().to_string(),
        }
    }
}

/// One analyzed sentence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SentenceDto {
    /// Character offset of the sentence start
    pub begin: usize,
    /// Character offset of the sentence end
    pub end: usize,
    /// Sentence text
    pub text: String,
    /// Morphemes in input order
    pub morphemes: Vec<MorphemeDto>,
}

impl SentenceDto {
    /// Build from the morphemes of one sentence
    pub fn from_morphemes(morphemes: &[Morpheme]) -> Self {
        let begin = morphemes.first().map_or(0, Morpheme::begin);
        let end = morphemes.last().map_or(begin, Morpheme::end);
        Self {
            begin,
            end,
            text: morphemes.iter().map(Morpheme::surface).collect(),
            morphemes: morphemes.iter().map(MorphemeDto::from).collect(),
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// True for a sentence without characters
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// Processing metadata
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Total characters processed
    pub total_chars: usize,
    /// Number of sentences
    pub sentence_count: usize,
    /// Number of morphemes
    pub morpheme_count: usize,
    /// Split mode used
    pub split_mode: String,
    /// Encoding applied to byte input
    pub encoding: String,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Complete output with sentences and metadata
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output {
    /// Analyzed sentences
    pub sentences: Vec<SentenceDto>,
    /// Processing metadata
    pub metadata: Metadata,
}

impl Output {
    /// Serialize to compact JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON
    #[cfg(feature = "serde")]
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
