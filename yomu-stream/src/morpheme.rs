//! Morphemes, split modes and the analyzer seam

use crate::error::BoxError;
use crate::segment::Sentence;
use std::fmt;
use std::str::FromStr;

/// Granularity of compound splitting, passed through to the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitMode {
    /// Short units
    A,
    /// Middle units
    B,
    /// Long units (named entities)
    #[default]
    C,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SplitMode::A => "A",
            SplitMode::B => "B",
            SplitMode::C => "C",
        };
        f.write_str(name)
    }
}

impl FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(SplitMode::A),
            "B" | "b" => Ok(SplitMode::B),
            "C" | "c" => Ok(SplitMode::C),
            other => Err(format!("unknown split mode '{other}', expected A, B or C")),
        }
    }
}

/// One unit of analysis with global character offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    begin: usize,
    end: usize,
    surface: String,
    category: String,
}

impl Morpheme {
    /// Create a morpheme covering `begin..end`
    pub fn new(begin: usize, end: usize, surface: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            surface: surface.into(),
            category: String::new(),
        }
    }

    /// Attach an analyzer-defined category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Global begin offset
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Global end offset
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// True for a zero-length morpheme
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Text of the morpheme
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Analyzer-defined category, empty if none was assigned
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Morphemes of one sentence, in input order
pub type MorphemeList = Vec<Morpheme>;

/// Morphological analysis of a single sentence
///
/// The returned morphemes must be sorted, contiguous, and cover exactly
/// `sentence.begin()..sentence.end()`.
pub trait Analyzer {
    /// Analyze one sentence
    fn analyze(&self, sentence: &Sentence<'_>, mode: SplitMode) -> Result<MorphemeList, BoxError>;
}

impl<T: Analyzer + ?Sized> Analyzer for &T {
    fn analyze(&self, sentence: &Sentence<'_>, mode: SplitMode) -> Result<MorphemeList, BoxError> {
        (**self).analyze(sentence, mode)
    }
}

impl<T: Analyzer + ?Sized> Analyzer for Box<T> {
    fn analyze(&self, sentence: &Sentence<'_>, mode: SplitMode) -> Result<MorphemeList, BoxError> {
        (**self).analyze(sentence, mode)
    }
}

/// Check that `morphemes` partition `begin..end` without gaps or overlaps
pub fn check_coverage(morphemes: &[Morpheme], begin: usize, end: usize) -> Result<(), String> {
    let mut cursor = begin;
    for (i, m) in morphemes.iter().enumerate() {
        if m.begin != cursor {
            return Err(format!(
                "morpheme {i} starts at {} but previous coverage ends at {cursor}",
                m.begin
            ));
        }
        if m.end <= m.begin {
            return Err(format!(
                "morpheme {i} has empty span {}..{}",
                m.begin, m.end
            ));
        }
        cursor = m.end;
    }
    if cursor != end {
        return Err(format!("coverage ends at {cursor}, sentence ends at {end}"));
    }
    Ok(())
}
