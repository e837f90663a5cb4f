//! Direct-to-writer encoding of outbound commands.
//!
//! `Display` on [`Outbound`] formats into a `String`; [`IrcEncode`] writes the
//! same bytes straight into any [`Write`] implementor (a socket buffer, a
//! `BytesMut` writer, a `Vec<u8>`).
//!
//! # Example
//!
//! ```
//! use slbot_proto::encode::IrcEncode;
//! use slbot_proto::Outbound;
//!
//! let mut buf = Vec::new();
//! Outbound::join("#rust").encode(&mut buf).unwrap();
//! assert_eq!(&buf, b"JOIN #rust\r\n");
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::command::Outbound;

/// Encode a protocol element directly to a byte stream.
pub trait IrcEncode {
    /// Encode this value to the given writer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the write fails.
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<usize>;

    /// Encode this value to a new `Vec<u8>`.
    #[must_use]
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        let _ = self.encode(&mut buf);
        buf
    }
}

/// Adapts an `io::Write` to `fmt::Write`, counting bytes and keeping the
/// first I/O error.
struct IoWriteSink<'w, W: Write> {
    inner: &'w mut W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> fmt::Write for IoWriteSink<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.inner.write_all(s.as_bytes()) {
            Ok(()) => {
                self.written += s.len();
                Ok(())
            }
            Err(e) => {
                self.error = Some(e);
                Err(fmt::Error)
            }
        }
    }
}

impl IrcEncode for Outbound {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut sink = IoWriteSink {
            inner: writer,
            written: 0,
            error: None,
        };
        match fmt::write(&mut sink, format_args!("{}", self)) {
            Ok(()) => Ok(sink.written),
            Err(_) => Err(sink
                .error
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "formatter error"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_privmsg() {
        let bytes = Outbound::privmsg("#channel", "Hello world!").to_bytes();
        assert_eq!(&bytes, b"PRIVMSG #channel :Hello world!\r\n");
    }

    #[test]
    fn test_encode_returns_byte_count() {
        let cmd = Outbound::register("bot", "slbot", "a bot");
        let mut buf = Vec::new();
        let written = cmd.encode(&mut buf).unwrap();
        assert_eq!(written, buf.len());
        assert_eq!(buf, cmd.to_string().into_bytes());
    }

    #[test]
    fn test_encode_propagates_io_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = Outbound::pong("x").encode(&mut Broken).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
