//! Pull-based sentence iterator
//!
//! [`SentenceIter`] composes a source, a segmenter and an analyzer into an
//! enumeration of per-sentence morpheme lists. Nothing happens until the
//! caller asks: construction never touches the source, and each call pulls
//! only as much text as is needed to confirm the next sentence.
//!
//! ```text
//!   Fresh ──(boundary in leftover window)──────────────▶ Ready
//!     │                                                   ▲
//!     └─(need more)─▶ Pending ──pull+segment──(confirmed)─┘
//!                       │  ▲         │
//!                       └──┘         ├─(end of stream, empty)──▶ Exhausted
//!                    (need more)     └─(fault)─────────────────▶ Failed
//! ```

use crate::buffer::InputBuffer;
use crate::error::{Result, StreamError};
use crate::morpheme::{check_coverage, Analyzer, MorphemeList, SplitMode};
use crate::segment::{Segment, Segmenter, Sentence};
use crate::source::{CharSource, Fill, SourceReader};
use log::{debug, trace};
use std::iter::FusedIterator;
use std::sync::Arc;

/// Characters requested from the source per fill
pub const DEFAULT_READ_CHUNK: usize = 4096;

/// Largest fill ever requested; larger chunk settings are clamped to it
pub const MAX_READ_CHUNK: usize = 1 << 20;

#[derive(Debug)]
enum State {
    /// No pull attempted for the next sentence yet
    Fresh,
    /// The buffered window holds no confirmed boundary
    Pending,
    /// The first `len` window characters form the next sentence
    Ready(usize),
    Exhausted,
    Failed(StreamError),
}

/// Lazy iterator over the analyzed sentences of a character stream
///
/// Single-pass and not restartable. Dropping it early is fine; the source
/// is never closed by the iterator.
///
/// Once a fault occurs, [`has_next`](Self::has_next) and
/// [`next_sentence`](Self::next_sentence) keep returning that same fault.
/// The [`Iterator`] implementation reports it once and then ends.
pub struct SentenceIter<S, G, A> {
    reader: SourceReader<S>,
    buffer: InputBuffer,
    scratch: Vec<char>,
    read_chunk: usize,
    segmenter: G,
    analyzer: A,
    mode: SplitMode,
    state: State,
    fault_reported: bool,
}

impl<S, G, A> SentenceIter<S, G, A>
where
    S: CharSource,
    G: Segmenter,
    A: Analyzer,
{
    /// Create an iterator bound to one source and split mode
    pub fn new(source: S, segmenter: G, analyzer: A, mode: SplitMode) -> Self {
        Self {
            reader: SourceReader::new(source),
            buffer: InputBuffer::new(),
            scratch: Vec::new(),
            read_chunk: DEFAULT_READ_CHUNK,
            segmenter,
            analyzer,
            mode,
            state: State::Fresh,
            fault_reported: false,
        }
    }

    /// Set how many characters each fill requests from the source
    ///
    /// A chunk of zero is a usage error reported on the first pull. Values
    /// above [`MAX_READ_CHUNK`] are clamped.
    pub fn with_read_chunk(mut self, read_chunk: usize) -> Self {
        self.read_chunk = read_chunk;
        self
    }

    /// Split mode handed to the analyzer
    pub fn split_mode(&self) -> SplitMode {
        self.mode
    }

    /// Characters obtained from the source so far
    pub fn chars_read(&self) -> usize {
        self.reader.chars_read()
    }

    /// Characters currently held but not yet emitted
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Storage currently allocated by the input buffer, in characters
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Whether another sentence is available
    ///
    /// May pull from the source and therefore fail.
    pub fn has_next(&mut self) -> Result<bool> {
        self.advance()?;
        Ok(matches!(self.state, State::Ready(_)))
    }

    /// Analyze and return the next sentence
    ///
    /// Fails with [`StreamError::Exhausted`] when no sentence is left.
    pub fn next_sentence(&mut self) -> Result<MorphemeList> {
        self.advance()?;
        let len = match self.state {
            State::Ready(len) => len,
            _ => return Err(StreamError::Exhausted),
        };

        let begin = self.buffer.window_begin();
        let end = begin + len;
        let sentence = Sentence::new(begin, &self.buffer.window()[..len]);
        let analyzed = self.analyzer.analyze(&sentence, self.mode);
        self.buffer.confirm_boundary(len);
        self.state = State::Fresh;

        let morphemes = analyzed.map_err(|source| StreamError::Analyzer {
            begin,
            end,
            source: Arc::from(source),
        });
        let morphemes = morphemes.and_then(|morphemes| {
            check_coverage(&morphemes, begin, end)
                .map(|()| morphemes)
                .map_err(|reason| StreamError::InvalidAnalysis { begin, end, reason })
        });
        morphemes.map_err(|err| self.fail(err))
    }

    /// Drive the state machine until a sentence is ready or the stream ends
    fn advance(&mut self) -> Result<()> {
        loop {
            match &self.state {
                State::Ready(_) | State::Exhausted => return Ok(()),
                State::Failed(err) => return Err(err.clone()),
                State::Fresh => {
                    self.state = self.segment()?;
                    if matches!(self.state, State::Fresh) {
                        self.state = State::Pending;
                    }
                }
                State::Pending => {
                    self.pull()?;
                    self.state = self.segment()?;
                }
            }
        }
    }

    fn pull(&mut self) -> Result<()> {
        self.scratch.resize(self.read_chunk.min(MAX_READ_CHUNK), '\0');
        match self.reader.fill(&mut self.scratch) {
            Ok(Fill::Read(n)) => {
                self.buffer.append(&self.scratch[..n]);
                Ok(())
            }
            Ok(Fill::EndOfStream) => {
                debug!(
                    "end of stream after {} chars, {} left unresolved",
                    self.reader.chars_read(),
                    self.buffer.len()
                );
                self.buffer.mark_end_of_stream();
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Consult the segmenter on the current window
    ///
    /// Returns the state to move to; `Fresh`/`Pending` are returned unchanged
    /// when more input is needed.
    fn segment(&mut self) -> Result<State> {
        let at_end = self.buffer.at_end_of_stream();
        let window = self.buffer.window();
        if window.is_empty() {
            return Ok(if at_end {
                State::Exhausted
            } else {
                self.waiting_state()
            });
        }

        match self.segmenter.find_boundary(window, at_end) {
            Segment::Confirmed(offset) if offset == 0 || offset > window.len() => {
                let err = StreamError::InvalidBoundary {
                    offset,
                    window: window.len(),
                };
                Err(self.fail(err))
            }
            Segment::Confirmed(offset) => {
                trace!(
                    "sentence confirmed at {}..{}",
                    self.buffer.window_begin(),
                    self.buffer.window_begin() + offset
                );
                Ok(State::Ready(offset))
            }
            Segment::NeedMoreInput if at_end => {
                trace!(
                    "final sentence at {}..{}",
                    self.buffer.window_begin(),
                    self.buffer.window_begin() + window.len()
                );
                Ok(State::Ready(window.len()))
            }
            Segment::NeedMoreInput => Ok(self.waiting_state()),
        }
    }

    fn waiting_state(&self) -> State {
        match self.state {
            State::Fresh => State::Fresh,
            _ => State::Pending,
        }
    }

    fn fail(&mut self, err: StreamError) -> StreamError {
        self.state = State::Failed(err.clone());
        err
    }
}

impl<S, G, A> Iterator for SentenceIter<S, G, A>
where
    S: CharSource,
    G: Segmenter,
    A: Analyzer,
{
    type Item = Result<MorphemeList>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fault_reported {
            return None;
        }
        match self.next_sentence() {
            Ok(morphemes) => Some(Ok(morphemes)),
            Err(StreamError::Exhausted) => None,
            Err(err) => {
                self.fault_reported = true;
                Some(Err(err))
            }
        }
    }
}

impl<S, G, A> FusedIterator for SentenceIter<S, G, A>
where
    S: CharSource,
    G: Segmenter,
    A: Analyzer,
{
}

impl<S, G, A> std::fmt::Debug for SentenceIter<S, G, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceIter")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .field("chars_read", &self.reader.chars_read())
            .finish()
    }
}
