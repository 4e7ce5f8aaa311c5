//! Tokenizer facade and builder
//!
//! Binds a [`SentenceDetector`] and an [`Analyzer`] to a configuration and
//! exposes the single-sentence, eager and lazy tokenize operations.

use crate::analyzer::CharClassAnalyzer;
use crate::config::TokenizerConfig;
use crate::detector::{SentenceDetector, WordListChecker};
use crate::error::Result;
use crate::input::{encoding_for_label, Input, InputSource, ReaderSource, StrSource};
use encoding_rs::{Encoding, UTF_8};
use log::debug;
use std::io::Read;
use yomu_stream::{
    collect_all, Analyzer, CharSource, MorphemeList, SentenceIter, SplitMode, WholeStream,
};

/// Lazy sentence iterator borrowing a [`Tokenizer`]
pub type TokenizerIter<'a, S, A = CharClassAnalyzer> = SentenceIter<S, &'a SentenceDetector, &'a A>;

/// Japanese tokenizer
#[derive(Debug)]
pub struct Tokenizer<A = CharClassAnalyzer> {
    config: TokenizerConfig,
    encoding: &'static Encoding,
    detector: SentenceDetector,
    analyzer: A,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Tokenizer with the default configuration and [`CharClassAnalyzer`]
    pub fn new() -> Self {
        Self {
            config: TokenizerConfig::default(),
            encoding: UTF_8,
            detector: SentenceDetector::new(),
            analyzer: CharClassAnalyzer,
        }
    }

    /// Start configuring a tokenizer
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }
}

impl<A: Analyzer> Tokenizer<A> {
    /// Active configuration
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Split mode used by the `*_default` operations
    pub fn split_mode(&self) -> SplitMode {
        self.config.split_mode
    }

    /// Encoding applied to byte input
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Sentence detector in use
    pub fn detector(&self) -> &SentenceDetector {
        &self.detector
    }

    /// Analyze `text` as one sentence
    ///
    /// Empty text yields an empty list.
    pub fn tokenize(&self, mode: SplitMode, text: &str) -> Result<MorphemeList> {
        let mut iter = SentenceIter::new(StrSource::new(text), WholeStream, &self.analyzer, mode)
            .with_read_chunk(self.config.read_chunk);
        if !iter.has_next()? {
            return Ok(Vec::new());
        }
        Ok(iter.next_sentence()?)
    }

    /// Analyze `text` as one sentence with the configured split mode
    pub fn tokenize_default(&self, text: &str) -> Result<MorphemeList> {
        self.tokenize(self.config.split_mode, text)
    }

    /// Split `text` into sentences and analyze each of them
    pub fn tokenize_sentences(&self, mode: SplitMode, text: &str) -> Result<Vec<MorphemeList>> {
        self.tokenize_all(StrSource::new(text), mode)
    }

    /// [`tokenize_sentences`](Self::tokenize_sentences) with the configured split mode
    pub fn tokenize_sentences_default(&self, text: &str) -> Result<Vec<MorphemeList>> {
        self.tokenize_sentences(self.config.split_mode, text)
    }

    /// Lazy iterator over the sentences of `source`
    ///
    /// Nothing is read from `source` until the iterator is advanced.
    pub fn sentence_iter<S: CharSource>(
        &self,
        mode: SplitMode,
        source: S,
    ) -> TokenizerIter<'_, S, A> {
        SentenceIter::new(source, &self.detector, &self.analyzer, mode)
            .with_read_chunk(self.config.read_chunk)
    }

    /// [`sentence_iter`](Self::sentence_iter) with the configured split mode
    pub fn sentence_iter_default<S: CharSource>(&self, source: S) -> TokenizerIter<'_, S, A> {
        self.sentence_iter(self.config.split_mode, source)
    }

    /// Analyze every sentence of `source` eagerly
    pub fn tokenize_all<S: CharSource>(
        &self,
        source: S,
        mode: SplitMode,
    ) -> Result<Vec<MorphemeList>> {
        let mut iter = self.sentence_iter(mode, source);
        Ok(collect_all(&mut iter)?)
    }

    /// Lazy iterator over a byte stream decoded with the configured encoding
    pub fn reader_iter<R: Read>(
        &self,
        mode: SplitMode,
        reader: R,
    ) -> TokenizerIter<'_, ReaderSource<R>, A> {
        self.sentence_iter(mode, ReaderSource::with_encoding(reader, self.encoding))
    }

    /// [`reader_iter`](Self::reader_iter) with the configured split mode
    pub fn reader_iter_default<R: Read>(&self, reader: R) -> TokenizerIter<'_, ReaderSource<R>, A> {
        self.reader_iter(self.config.split_mode, reader)
    }

    /// Analyze every sentence of a byte stream eagerly
    pub fn tokenize_reader<R: Read>(
        &self,
        mode: SplitMode,
        reader: R,
    ) -> Result<Vec<MorphemeList>> {
        let mut iter = self.reader_iter(mode, reader);
        Ok(collect_all(&mut iter)?)
    }

    /// Lazy iterator over any [`Input`]
    pub fn input_iter(&self, mode: SplitMode, input: Input) -> TokenizerIter<'_, InputSource, A> {
        self.sentence_iter(mode, input.into_source(self.encoding))
    }
}

/// Builder for [`Tokenizer`]
///
/// Provides a fluent interface over [`TokenizerConfig`].
#[derive(Debug)]
pub struct TokenizerBuilder<A = CharClassAnalyzer> {
    config: TokenizerConfig,
    analyzer: A,
}

impl Default for TokenizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerBuilder {
    /// Builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: TokenizerConfig::default(),
            analyzer: CharClassAnalyzer,
        }
    }
}

impl<A: Analyzer> TokenizerBuilder<A> {
    /// Replace the whole configuration
    pub fn config(mut self, config: TokenizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default split mode
    pub fn split_mode(mut self, mode: SplitMode) -> Self {
        self.config.split_mode = mode;
        self
    }

    /// Set the characters requested per fill
    pub fn read_chunk(mut self, read_chunk: usize) -> Self {
        self.config.read_chunk = read_chunk;
        self
    }

    /// Set the maximum sentence length
    pub fn sentence_limit(mut self, limit: usize) -> Self {
        self.config.sentence_limit = limit;
        self
    }

    /// Set the encoding label for byte input
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.config.encoding = label.into();
        self
    }

    /// Set the words a sentence boundary must not split
    pub fn non_break_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.non_break_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Use a different analyzer
    pub fn analyzer<B: Analyzer>(self, analyzer: B) -> TokenizerBuilder<B> {
        TokenizerBuilder {
            config: self.config,
            analyzer,
        }
    }

    /// Validate the configuration and build the tokenizer
    pub fn build(self) -> Result<Tokenizer<A>> {
        self.config.validate()?;
        let encoding = encoding_for_label(&self.config.encoding)?;

        let mut detector = SentenceDetector::with_limit(self.config.sentence_limit);
        let checker = WordListChecker::new(&self.config.non_break_words);
        if !checker.is_empty() {
            detector = detector.with_checker(checker);
        }

        debug!(
            "tokenizer ready: mode {}, read chunk {}, sentence limit {}, encoding {}",
            self.config.split_mode,
            self.config.read_chunk,
            self.config.sentence_limit,
            encoding.name()
        );

        Ok(Tokenizer {
            config: self.config,
            encoding,
            detector,
            analyzer: self.analyzer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use yomu_stream::{BoxError, Morpheme, Sentence, StreamError};

    fn surfaces(morphemes: &[yomu_stream::Morpheme]) -> Vec<&str> {
        morphemes.iter().map(|m| m.surface()).collect()
    }

    #[test]
    fn test_tokenize_single_sentence() {
        let tokenizer = Tokenizer::new();
        let morphemes = tokenizer
            .tokenize(SplitMode::C, "東京へ行く。京都へ行く。")
            .unwrap();
        assert_eq!(morphemes.first().unwrap().begin(), 0);
        assert_eq!(morphemes.last().unwrap().end(), 12);
        assert!(tokenizer.tokenize(SplitMode::C, "").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_sentences() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer
            .tokenize_sentences(SplitMode::C, "東京へ行く。京都へ行く。")
            .unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            surfaces(&sentences[1]),
            vec!["京都", "へ", "行", "く", "。"]
        );
        assert_eq!(sentences[1][0].begin(), 6);
    }

    #[test]
    fn test_default_mode_from_builder() {
        let tokenizer = Tokenizer::builder()
            .split_mode(SplitMode::A)
            .build()
            .unwrap();
        let morphemes = tokenizer.tokenize_default("国家").unwrap();
        assert_eq!(surfaces(&morphemes), vec!["国", "家"]);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        assert!(matches!(
            Tokenizer::builder().read_chunk(0).build(),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            Tokenizer::builder().encoding("martian").build(),
            Err(EngineError::UnknownEncoding { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_oversized_read_chunk() {
        assert!(matches!(
            Tokenizer::builder().read_chunk(usize::MAX / 8).build(),
            Err(EngineError::Config(_))
        ));

        let tokenizer = Tokenizer::builder()
            .read_chunk(yomu_stream::MAX_READ_CHUNK)
            .build()
            .unwrap();
        let sentences = tokenizer
            .tokenize_sentences(SplitMode::C, "晴れ。")
            .unwrap();
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_non_break_words() {
        let text = "モーニング娘。の歌。";
        let plain = Tokenizer::new()
            .tokenize_sentences(SplitMode::C, text)
            .unwrap();
        assert_eq!(plain.len(), 2);

        let tokenizer = Tokenizer::builder()
            .non_break_words(["モーニング娘。"])
            .build()
            .unwrap();
        let sentences = tokenizer.tokenize_sentences(SplitMode::C, text).unwrap();
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_reader_uses_configured_encoding() {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("晴れ。雨。");
        let tokenizer = Tokenizer::builder().encoding("shift_jis").build().unwrap();
        let sentences = tokenizer
            .tokenize_reader(SplitMode::C, &bytes[..])
            .unwrap();
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_input_iter() {
        let tokenizer = Tokenizer::new();
        let count = tokenizer
            .input_iter(SplitMode::C, Input::from_text("晴れ。雨。曇り"))
            .count();
        assert_eq!(count, 3);
    }

    struct Failing;

    impl Analyzer for Failing {
        fn analyze(
            &self,
            _sentence: &Sentence<'_>,
            _mode: SplitMode,
        ) -> std::result::Result<Vec<Morpheme>, BoxError> {
            Err("no dictionary".into())
        }
    }

    #[test]
    fn test_custom_analyzer_errors_surface() {
        let tokenizer = Tokenizer::builder().analyzer(Failing).build().unwrap();
        let err = tokenizer
            .tokenize_sentences(SplitMode::C, "あ。")
            .unwrap_err();
        match err {
            EngineError::Stream(StreamError::Analyzer { begin, end, source }) => {
                assert_eq!((begin, end), (0, 2));
                assert_eq!(source.to_string(), "no dictionary");
            }
            other => panic!("Expected analyzer error, got {other:?}"),
        }
    }
}
