//! Character sources for text, byte streams and files
//!
//! [`StrSource`] serves text that is already decoded. [`ReaderSource`]
//! decodes an [`io::Read`] incrementally with `encoding_rs`, so multi-byte
//! sequences split across reads are reassembled and malformed bytes become
//! U+FFFD. [`Input`] unifies the different origins and turns them into an
//! [`InputSource`] without touching the file system until the first pull.

use crate::error::{EngineError, Result};
use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use yomu_stream::{CharSource, Pull};

/// Bytes requested from a reader per refill
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Look up an encoding by its WHATWG label
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| EngineError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Source over text that is already decoded
#[derive(Debug, Clone)]
pub struct StrSource<T> {
    text: T,
    pos: usize,
    max_chunk: usize,
}

impl<T: AsRef<str>> StrSource<T> {
    /// Serve `text` in pieces as large as the caller asks for
    pub fn new(text: T) -> Self {
        Self {
            text,
            pos: 0,
            max_chunk: usize::MAX,
        }
    }

    /// Never deliver more than `max_chunk` characters per pull
    ///
    /// A value of zero is treated as one.
    pub fn with_max_chunk(mut self, max_chunk: usize) -> Self {
        self.max_chunk = max_chunk.max(1);
        self
    }
}

impl<T: AsRef<str>> CharSource for StrSource<T> {
    fn pull(&mut self, buf: &mut [char]) -> io::Result<Pull> {
        let rest = &self.text.as_ref()[self.pos..];
        if rest.is_empty() {
            return Ok(Pull::EndOfStream);
        }
        let limit = buf.len().min(self.max_chunk);
        let mut n = 0;
        for (slot, c) in buf[..limit].iter_mut().zip(rest.chars()) {
            *slot = c;
            self.pos += c.len_utf8();
            n += 1;
        }
        Ok(Pull::Chars(n))
    }
}

/// Source decoding bytes from an [`io::Read`]
///
/// The encoding is sniffed from a byte order mark when present.
pub struct ReaderSource<R> {
    reader: R,
    decoder: Decoder,
    bytes: Vec<u8>,
    decoded: String,
    consumed: usize,
    finished: bool,
}

impl<R> std::fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderSource")
            .field("encoding", &self.decoder.encoding().name())
            .field("pending", &(self.decoded.len() - self.consumed))
            .field("finished", &self.finished)
            .finish()
    }
}

impl<R: Read> ReaderSource<R> {
    /// Decode `reader` as UTF-8
    pub fn new(reader: R) -> Self {
        Self::with_encoding(reader, UTF_8)
    }

    /// Decode `reader` with the given encoding
    pub fn with_encoding(reader: R, encoding: &'static Encoding) -> Self {
        Self {
            reader,
            decoder: encoding.new_decoder(),
            bytes: vec![0; READ_BUFFER_SIZE],
            decoded: String::new(),
            consumed: 0,
            finished: false,
        }
    }

    /// Decode `reader` with the encoding named by `label`
    pub fn with_label(reader: R, label: &str) -> Result<Self> {
        Ok(Self::with_encoding(reader, encoding_for_label(label)?))
    }

    /// Read and decode the next block of bytes
    fn refill(&mut self) -> io::Result<()> {
        let n = loop {
            match self.reader.read(&mut self.bytes) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        let last = n == 0;

        self.decoded.clear();
        self.consumed = 0;
        let needed = self
            .decoder
            .max_utf8_buffer_length(n)
            .ok_or_else(|| io::Error::other("decoded block exceeds addressable memory"))?;
        self.decoded.reserve(needed);
        // The reservation above fits the whole block
        let (result, read, _) = self
            .decoder
            .decode_to_string(&self.bytes[..n], &mut self.decoded, last);
        debug_assert!(matches!(result, CoderResult::InputEmpty));
        debug_assert_eq!(read, n);

        if last {
            debug!("reader drained, decoder flushed");
            self.finished = true;
        }
        Ok(())
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn pull(&mut self, buf: &mut [char]) -> io::Result<Pull> {
        loop {
            if self.consumed < self.decoded.len() {
                let mut n = 0;
                for (slot, c) in buf.iter_mut().zip(self.decoded[self.consumed..].chars()) {
                    *slot = c;
                    self.consumed += c.len_utf8();
                    n += 1;
                }
                return Ok(Pull::Chars(n));
            }
            if self.finished {
                return Ok(Pull::EndOfStream);
            }
            self.refill()?;
        }
    }
}

/// Unified input abstraction
pub enum Input {
    /// Direct text string
    Text(String),
    /// File path to read from
    File(PathBuf),
    /// Encoded bytes
    Bytes(Vec<u8>),
    /// Reader stream (for stdin, network, etc.)
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
        }
    }
}

impl Input {
    /// Create input from a text string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Turn the input into a character source
    ///
    /// `encoding` applies to files, bytes and readers. Files are opened on
    /// the first pull, so a missing file surfaces as a read fault then.
    pub fn into_source(self, encoding: &'static Encoding) -> InputSource {
        let inner = match self {
            Input::Text(text) => Inner::Text(StrSource::new(text)),
            Input::File(path) => Inner::PendingFile { path, encoding },
            Input::Bytes(bytes) => {
                let reader = io::Cursor::new(bytes);
                Inner::Bytes(ReaderSource::with_encoding(reader, encoding))
            }
            Input::Reader(reader) => Inner::Reader(ReaderSource::with_encoding(reader, encoding)),
        };
        InputSource { inner }
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

/// Character source produced by [`Input::into_source`]
#[derive(Debug)]
pub struct InputSource {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Text(StrSource<String>),
    PendingFile {
        path: PathBuf,
        encoding: &'static Encoding,
    },
    File(ReaderSource<fs::File>),
    Bytes(ReaderSource<io::Cursor<Vec<u8>>>),
    Reader(ReaderSource<Box<dyn Read + Send>>),
}

impl CharSource for InputSource {
    fn pull(&mut self, buf: &mut [char]) -> io::Result<Pull> {
        loop {
            match &mut self.inner {
                Inner::Text(source) => return source.pull(buf),
                Inner::File(source) => return source.pull(buf),
                Inner::Bytes(source) => return source.pull(buf),
                Inner::Reader(source) => return source.pull(buf),
                Inner::PendingFile { path, encoding } => {
                    debug!("opening {}", path.display());
                    let file = fs::File::open(&*path).map_err(|e| {
                        io::Error::new(e.kind(), format!("failed to open {}: {e}", path.display()))
                    })?;
                    let encoding = *encoding;
                    self.inner = Inner::File(ReaderSource::with_encoding(file, encoding));
                }
            }
        }
    }
}
