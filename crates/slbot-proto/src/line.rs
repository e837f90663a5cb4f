//! Stream-to-line framing.
//!
//! The server delivers an unbounded byte stream; [`LineFramer`] reassembles it
//! into protocol lines split at `\r` or `\n`. The partial line buffer lives in
//! the framer, so one framer must be kept per connection and fed every chunk
//! read from that connection in order.
//!
//! Lines are held in a fixed 512-byte buffer. A line that does not fit is
//! truncated to its first 511 bytes rather than rejected; the remaining bytes
//! of that line are dropped until the next terminator.
//!
//! # Example
//!
//! ```
//! use slbot_proto::line::LineFramer;
//!
//! let mut framer = LineFramer::new();
//! assert_eq!(framer.feed(b"PING :ab").count(), 0);
//!
//! let lines: Vec<_> = framer.feed(b"c\r\n").collect();
//! assert_eq!(lines[0].as_bytes(), b"PING :abc");
//! assert!(lines[1].is_empty()); // the `\n` of CRLF closes an empty line
//! ```

use std::borrow::Cow;
use std::fmt;

/// Capacity of the per-connection line buffer, terminator slot included.
pub const BUFFER_CAPACITY: usize = 512;

/// Longest line the framer can capture.
pub const MAX_LINE_LEN: usize = BUFFER_CAPACITY - 1;

/// Maximum number of bytes requested from the transport per read.
pub const RECV_CHUNK: usize = BUFFER_CAPACITY - 2;

/// Connection-scoped line reassembly state.
pub struct LineFramer {
    buf: [u8; BUFFER_CAPACITY],
    len: usize,
    overflowed: bool,
}

impl LineFramer {
    /// Create an empty framer.
    pub fn new() -> Self {
        Self {
            buf: [0; BUFFER_CAPACITY],
            len: 0,
            overflowed: false,
        }
    }

    /// Feed one chunk read from the transport.
    ///
    /// Returns a lazy iterator over the lines completed by this chunk,
    /// including empty lines (a CRLF pair yields the line and then an empty
    /// one). Bytes after the last terminator stay buffered for the next call.
    /// The iterator should be drained; bytes it has not visited when dropped
    /// are discarded.
    pub fn feed<'f, 'c>(&'f mut self, chunk: &'c [u8]) -> Lines<'f, 'c> {
        Lines {
            framer: self,
            chunk,
            pos: 0,
        }
    }

    /// Bytes of the current, not yet terminated line.
    pub fn pending(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn push(&mut self, byte: u8) {
        if self.len < MAX_LINE_LEN {
            self.buf[self.len] = byte;
            self.len += 1;
        } else {
            self.overflowed = true;
        }
    }

    fn take_line(&mut self) -> Line {
        let line = Line {
            bytes: self.buf[..self.len].to_vec(),
            truncated: self.overflowed,
        };
        self.len = 0;
        self.overflowed = false;
        line
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LineFramer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineFramer")
            .field("pending", &String::from_utf8_lossy(self.pending()))
            .field("overflowed", &self.overflowed)
            .finish()
    }
}

/// Iterator over the lines completed by one chunk. See [`LineFramer::feed`].
pub struct Lines<'f, 'c> {
    framer: &'f mut LineFramer,
    chunk: &'c [u8],
    pos: usize,
}

impl Iterator for Lines<'_, '_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        while let Some(&byte) = self.chunk.get(self.pos) {
            self.pos += 1;
            match byte {
                b'\r' | b'\n' => return Some(self.framer.take_line()),
                _ => self.framer.push(byte),
            }
        }
        None
    }
}

/// One complete protocol line with its terminator stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8>,
    truncated: bool,
}

impl Line {
    /// Raw line bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True for the empty line between `\r` and `\n`, or a blank line.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if bytes were dropped because the line exceeded [`MAX_LINE_LEN`].
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// The line as text. Invalid UTF-8 sequences are replaced with U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}
