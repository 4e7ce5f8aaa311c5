//! Character class analyzer
//!
//! Groups each sentence into runs of the same character category. Kanji runs
//! are the only compound units, so the split mode decides how far they are
//! broken up: mode C keeps whole runs, mode B cuts them into two-character
//! units and mode A into single characters. Symbols always stand alone.

use std::fmt;
use yomu_stream::{Analyzer, BoxError, Morpheme, MorphemeList, Sentence, SplitMode};

/// Category of a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharCategory {
    /// CJK ideographs and iteration marks
    Kanji,
    /// Hiragana
    Hiragana,
    /// Katakana, full and half width, with the prolonged sound mark
    Katakana,
    /// Latin letters, full and half width
    Alpha,
    /// Digits, full and half width
    Numeric,
    /// Whitespace, including the ideographic space
    Space,
    /// Punctuation and symbols
    Symbol,
    /// Anything else
    Default,
}

impl CharCategory {
    /// Classify one character
    pub fn of(c: char) -> Self {
        match c {
            '々'
            | '〆'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}' => CharCategory::Kanji,
            '\u{3041}'..='\u{309F}' => CharCategory::Hiragana,
            '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
                CharCategory::Katakana
            }
            'a'..='z' | 'A'..='Z' | 'ａ'..='ｚ' | 'Ａ'..='Ｚ' => CharCategory::Alpha,
            '0'..='9' | '０'..='９' => CharCategory::Numeric,
            c if c.is_whitespace() => CharCategory::Space,
            c if c.is_alphanumeric() => CharCategory::Default,
            _ => CharCategory::Symbol,
        }
    }

    /// Name used as the morpheme category
    pub fn as_str(&self) -> &'static str {
        match self {
            CharCategory::Kanji => "KANJI",
            CharCategory::Hiragana => "HIRAGANA",
            CharCategory::Katakana => "KATAKANA",
            CharCategory::Alpha => "ALPHA",
            CharCategory::Numeric => "NUMERIC",
            CharCategory::Space => "SPACE",
            CharCategory::Symbol => "SYMBOL",
            CharCategory::Default => "DEFAULT",
        }
    }

    /// Longest unit a run of this category is split into
    fn unit_len(&self, mode: SplitMode) -> Option<usize> {
        match (self, mode) {
            (CharCategory::Symbol, _) => Some(1),
            (CharCategory::Kanji, SplitMode::A) => Some(1),
            (CharCategory::Kanji, SplitMode::B) => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for CharCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dictionary-free analyzer splitting on character class changes
#[derive(Debug, Clone, Copy, Default)]
pub struct CharClassAnalyzer;

impl CharClassAnalyzer {
    /// Create the analyzer
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for CharClassAnalyzer {
    fn analyze(&self, sentence: &Sentence<'_>, mode: SplitMode) -> Result<MorphemeList, BoxError> {
        let chars = sentence.chars();
        let mut morphemes = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let category = CharCategory::of(chars[start]);
            let run = chars[start..]
                .iter()
                .take_while(|&&c| CharCategory::of(c) == category)
                .count();
            let unit = category.unit_len(mode).unwrap_or(run);

            let run_end = start + run;
            while start < run_end {
                let end = (start + unit).min(run_end);
                let begin = sentence.begin() + start;
                let global_end = sentence.begin() + end;
                morphemes.push(
                    Morpheme::new(begin, global_end, sentence.surface(begin, global_end))
                        .with_category(category.as_str()),
                );
                start = end;
            }
        }
        Ok(morphemes)
    }
}
