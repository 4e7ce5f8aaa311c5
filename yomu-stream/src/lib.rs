//! Bounded-memory streaming sentence pipeline
//!
//! This crate turns an unbounded character stream into analyzed sentences
//! while holding only the unresolved tail of the stream in memory:
//!
//! - [`source`]: the pull-based [`CharSource`] capability and its adapter
//! - [`buffer`]: the append-and-compact [`InputBuffer`]
//! - [`segment`]: the [`Segmenter`] seam deciding sentence ends
//! - [`morpheme`]: [`Morpheme`], [`SplitMode`] and the [`Analyzer`] seam
//! - [`iter`]: the lazy [`SentenceIter`] state machine
//! - [`collect`]: eager draining with [`collect_all`] / [`tokenize_all`]
//!
//! # Example
//!
//! ```rust
//! use yomu_stream::{
//!     from_fn, tokenize_all, Analyzer, BoxError, Morpheme, MorphemeList, Pull, Segment,
//!     Segmenter, Sentence, SplitMode,
//! };
//!
//! struct Periods;
//! impl Segmenter for Periods {
//!     fn find_boundary(&self, window: &[char], at_end: bool) -> Segment {
//!         match window.iter().position(|&c| c == '。') {
//!             Some(i) if i + 1 < window.len() || at_end => Segment::Confirmed(i + 1),
//!             _ => Segment::NeedMoreInput,
//!         }
//!     }
//! }
//!
//! struct Whole;
//! impl Analyzer for Whole {
//!     fn analyze(&self, s: &Sentence<'_>, _: SplitMode) -> Result<MorphemeList, BoxError> {
//!         Ok(vec![Morpheme::new(s.begin(), s.end(), s.to_string())])
//!     }
//! }
//!
//! let text: Vec<char> = "晴れ。雨".chars().collect();
//! let mut pos = 0;
//! let source = from_fn(move |buf: &mut [char]| {
//!     if pos == text.len() {
//!         return Ok(Pull::EndOfStream);
//!     }
//!     buf[0] = text[pos];
//!     pos += 1;
//!     Ok(Pull::Chars(1))
//! });
//!
//! let sentences = tokenize_all(source, Periods, Whole, SplitMode::C).unwrap();
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[1][0].surface(), "雨");
//! assert_eq!(sentences[1][0].begin(), 3);
//! ```

#![warn(missing_docs)]

pub mod buffer;
pub mod collect;
pub mod error;
pub mod iter;
pub mod morpheme;
pub mod segment;
pub mod source;

pub use buffer::InputBuffer;
pub use collect::{collect_all, tokenize_all};
pub use error::{BoxError, Result, StreamError};
pub use iter::{SentenceIter, DEFAULT_READ_CHUNK, MAX_READ_CHUNK};
pub use morpheme::{check_coverage, Analyzer, Morpheme, MorphemeList, SplitMode};
pub use segment::{Segment, Segmenter, Sentence, WholeStream};
pub use source::{from_fn, CharSource, FromFn, Pull, MAX_EMPTY_PULLS};
