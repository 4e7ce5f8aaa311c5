//! Sentence boundary seam

use std::fmt;

/// Answer from a [`Segmenter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The first `n` window characters form a complete sentence
    Confirmed(usize),
    /// No boundary can be decided from the current window
    NeedMoreInput,
}

/// Decides where the next sentence ends
///
/// The window always starts at the beginning of an unresolved sentence.
/// When `at_end_of_stream` is true no further characters will follow the
/// window; answering [`Segment::NeedMoreInput`] then makes the whole window
/// the final sentence.
pub trait Segmenter {
    /// Find the end of the first sentence in `window`
    fn find_boundary(&self, window: &[char], at_end_of_stream: bool) -> Segment;
}

impl<T: Segmenter + ?Sized> Segmenter for &T {
    fn find_boundary(&self, window: &[char], at_end_of_stream: bool) -> Segment {
        (**self).find_boundary(window, at_end_of_stream)
    }
}

impl<T: Segmenter + ?Sized> Segmenter for Box<T> {
    fn find_boundary(&self, window: &[char], at_end_of_stream: bool) -> Segment {
        (**self).find_boundary(window, at_end_of_stream)
    }
}

/// Segmenter that never splits: the whole stream is one sentence
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeStream;

impl Segmenter for WholeStream {
    fn find_boundary(&self, _window: &[char], _at_end_of_stream: bool) -> Segment {
        Segment::NeedMoreInput
    }
}

/// A finalized span of the input handed to the analyzer
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    begin: usize,
    text: &'a [char],
}

impl<'a> Sentence<'a> {
    /// Create a sentence starting at global offset `begin`
    pub fn new(begin: usize, text: &'a [char]) -> Self {
        Self { begin, text }
    }

    /// Global offset of the first character
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Global offset one past the last character
    pub fn end(&self) -> usize {
        self.begin + self.text.len()
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True for a zero-length sentence
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The characters of the sentence
    pub fn chars(&self) -> &'a [char] {
        self.text
    }

    /// Text between two global offsets inside the sentence
    pub fn surface(&self, begin: usize, end: usize) -> String {
        let from = begin.saturating_sub(self.begin).min(self.text.len());
        let to = end.saturating_sub(self.begin).clamp(from, self.text.len());
        self.text[from..to].iter().collect()
    }
}

impl fmt::Display for Sentence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.text {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Sentence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sentence")
            .field("begin", &self.begin)
            .field("end", &self.end())
            .field("text", &self.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_offsets() {
        let text: Vec<char> = "東京に行く。".chars().collect();
        let sentence = Sentence::new(10, &text);

        assert_eq!(sentence.begin(), 10);
        assert_eq!(sentence.end(), 16);
        assert_eq!(sentence.len(), 6);
        assert_eq!(sentence.to_string(), "東京に行く。");
        assert_eq!(sentence.surface(10, 12), "東京");
        assert_eq!(sentence.surface(14, 99), "く。");
    }

    #[test]
    fn test_whole_stream_never_confirms() {
        let window: Vec<char> = "文。文。".chars().collect();
        assert_eq!(
            WholeStream.find_boundary(&window, true),
            Segment::NeedMoreInput
        );
    }
}
