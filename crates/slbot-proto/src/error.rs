//! Error types for the bot protocol library.
//!
//! Framing and parsing never fail (oversized lines are truncated and
//! unclassifiable lines become [`ParsedMessage::Ignorable`](crate::ParsedMessage)),
//! so the only fallible operations are writing outbound bytes and building
//! percent-encoded links.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error while writing an outbound command.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Percent-encoding ran out of room.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

/// Errors produced by the percent-encoder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// The destination budget was exhausted before the source was consumed.
    ///
    /// Whatever was encoded so far is discarded; callers must never emit a
    /// partially encoded link.
    #[error("encoded output exceeds budget of {budget} bytes after {consumed} input bytes")]
    BudgetExhausted {
        /// Maximum number of output bytes allowed.
        budget: usize,
        /// Number of source bytes encoded before the budget ran out.
        consumed: usize,
    },
}
