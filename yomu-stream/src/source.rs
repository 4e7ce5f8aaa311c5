//! Character sources and the adapter that drives them
//!
//! A [`CharSource`] is the only capability the pipeline needs from the
//! outside world: fill a slice with characters, say "end of stream", or fail.
//! It makes no promise about how many characters it delivers per call.
//! [`SourceReader`] turns that into the contract the iterator relies on.

use crate::error::{Result, StreamError};
use std::io;

/// Consecutive `Chars(0)` answers tolerated before the source is declared broken
pub const MAX_EMPTY_PULLS: usize = 8;

/// Outcome of a single pull
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    /// This many characters were written to the front of the destination
    Chars(usize),
    /// The source has no more characters
    EndOfStream,
}

/// Pull-based producer of characters
///
/// `buf` is never empty. Implementations write between 1 and `buf.len()`
/// characters to the front of `buf` and report how many, or report
/// [`Pull::EndOfStream`].
pub trait CharSource {
    /// Pull up to `buf.len()` characters
    fn pull(&mut self, buf: &mut [char]) -> io::Result<Pull>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn pull(&mut self, buf: &mut [char]) -> io::Result<Pull> {
        (**self).pull(buf)
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn pull(&mut self, buf: &mut [char]) -> io::Result<Pull> {
        (**self).pull(buf)
    }
}

/// Source backed by a closure, see [`from_fn`]
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

/// Create a source from a closure
///
/// ```
/// use yomu_stream::source::{from_fn, CharSource, Pull};
///
/// let mut sent = false;
/// let mut source = from_fn(move |buf: &mut [char]| {
///     if sent {
///         return Ok(Pull::EndOfStream);
///     }
///     sent = true;
///     buf[0] = '東';
///     Ok(Pull::Chars(1))
/// });
///
/// let mut buf = ['\0'; 4];
/// assert_eq!(source.pull(&mut buf).unwrap(), Pull::Chars(1));
/// assert_eq!(source.pull(&mut buf).unwrap(), Pull::EndOfStream);
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&mut [char]) -> io::Result<Pull>,
{
    FromFn(f)
}

impl<F> CharSource for FromFn<F>
where
    F: FnMut(&mut [char]) -> io::Result<Pull>,
{
    fn pull(&mut self, buf: &mut [char]) -> io::Result<Pull> {
        (self.0)(buf)
    }
}

/// Result of a [`SourceReader::fill`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fill {
    /// At least one character was written
    Read(usize),
    /// Nothing was written and the source is finished
    EndOfStream,
}

/// Uniform wrapper over a caller-supplied source
///
/// Reads as much as it can into the destination, so the amount of text the
/// iterator sees per step does not depend on how the source chunks its
/// reads. A fault that follows successfully read characters is held back
/// until the next fill, so data is never lost in front of an error.
#[derive(Debug)]
pub(crate) struct SourceReader<S> {
    source: S,
    pending_fault: Option<io::Error>,
    finished: bool,
    chars_read: usize,
}

impl<S> SourceReader<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            pending_fault: None,
            finished: false,
            chars_read: 0,
        }
    }

    /// Total characters obtained from the source so far
    pub(crate) fn chars_read(&self) -> usize {
        self.chars_read
    }
}

impl<S: CharSource> SourceReader<S> {
    /// Fill `dest` until it is full or the source ends
    pub(crate) fn fill(&mut self, dest: &mut [char]) -> Result<Fill> {
        if dest.is_empty() {
            return Err(StreamError::invalid_usage(
                "pull requested with an empty destination",
            ));
        }
        if let Some(fault) = self.pending_fault.take() {
            return Err(StreamError::source_read(self.chars_read, fault));
        }
        if self.finished {
            return Ok(Fill::EndOfStream);
        }

        let mut filled = 0;
        let mut empty_pulls = 0;
        while filled < dest.len() {
            let remaining = dest.len() - filled;
            match self.source.pull(&mut dest[filled..]) {
                Ok(Pull::Chars(0)) => {
                    empty_pulls += 1;
                    if empty_pulls >= MAX_EMPTY_PULLS {
                        return Err(StreamError::invalid_usage(format!(
                            "source returned no characters {empty_pulls} times without ending"
                        )));
                    }
                }
                Ok(Pull::Chars(n)) if n > remaining => {
                    return Err(StreamError::invalid_usage(format!(
                        "source reported {n} characters for a destination of {remaining}"
                    )));
                }
                Ok(Pull::Chars(n)) => {
                    filled += n;
                    self.chars_read += n;
                    empty_pulls = 0;
                }
                Ok(Pull::EndOfStream) => {
                    self.finished = true;
                    break;
                }
                Err(fault) if filled == 0 => {
                    return Err(StreamError::source_read(self.chars_read, fault));
                }
                Err(fault) => {
                    self.pending_fault = Some(fault);
                    break;
                }
            }
        }

        if filled == 0 {
            Ok(Fill::EndOfStream)
        } else {
            Ok(Fill::Read(filled))
        }
    }
}
