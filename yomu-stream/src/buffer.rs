//! Append-and-compact buffer holding the unresolved tail of the stream

use log::trace;

/// Buffer of characters not yet assigned to a sentence
///
/// The characters live in a `Vec<char>` arena. `start` marks the beginning
/// of the live window and `origin` is the global stream offset of the arena's
/// first slot. Retired characters are reclaimed by shifting the window to the
/// front of the arena instead of reallocating, so storage tracks the longest
/// unresolved window rather than the total input.
#[derive(Debug, Default)]
pub struct InputBuffer {
    data: Vec<char>,
    start: usize,
    origin: usize,
    end_of_stream: bool,
}

impl InputBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` characters
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append freshly pulled characters after the window
    pub fn append(&mut self, chars: &[char]) {
        if chars.is_empty() {
            return;
        }
        let live = self.len();
        let would_grow = self.data.len() + chars.len() > self.data.capacity();
        if self.start > 0 && (self.start >= live || would_grow) {
            self.compact();
        }
        self.data.extend_from_slice(chars);
    }

    /// Retire the first `len` characters of the window
    ///
    /// Returns the global `(begin, end)` span of the retired characters.
    /// `len` is clamped to the window length.
    pub fn confirm_boundary(&mut self, len: usize) -> (usize, usize) {
        let len = len.min(self.len());
        let begin = self.window_begin();
        self.start += len;
        if self.start == self.data.len() {
            // nothing live: reset in place
            self.origin += self.start;
            self.start = 0;
            self.data.clear();
        }
        (begin, begin + len)
    }

    /// The unresolved characters
    pub fn window(&self) -> &[char] {
        &self.data[self.start..]
    }

    /// Global offset of the first window character
    pub fn window_begin(&self) -> usize {
        self.origin + self.start
    }

    /// Number of unresolved characters
    pub fn len(&self) -> usize {
        self.data.len() - self.start
    }

    /// True if no unresolved characters are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated storage in characters
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Record that the source has ended
    pub fn mark_end_of_stream(&mut self) {
        self.end_of_stream = true;
    }

    /// True once the source has ended
    pub fn at_end_of_stream(&self) -> bool {
        self.end_of_stream
    }

    /// True when the source has ended and nothing is left unresolved
    pub fn is_exhausted(&self) -> bool {
        self.end_of_stream && self.is_empty()
    }

    fn compact(&mut self) {
        trace!(
            "compacting input buffer: retiring {} chars, keeping {}",
            self.start,
            self.len()
        );
        self.data.copy_within(self.start.., 0);
        self.data.truncate(self.len());
        self.origin += self.start;
        self.start = 0;
    }
}
