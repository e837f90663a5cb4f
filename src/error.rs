//! Unified error handling for slbot.
//!
//! Only [`EngineError`] ends a connection. [`HandlerError`] is logged by the
//! dispatcher and the run loop moves on to the next line.

use slbot_proto::ProtocolError;
use thiserror::Error;

// ============================================================================
// Engine Errors (transport)
// ============================================================================

/// Errors that terminate the run loop.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The server closed the connection (a read returned zero bytes).
    #[error("connection closed by server")]
    Closed,

    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    #[error("send failed: {0}")]
    Send(#[from] ProtocolError),
}

impl EngineError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Io(_) => "io",
            Self::Send(_) => "send",
        }
    }
}

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors a command handler reports back to the dispatcher.
///
/// None of these are ever shown in the channel.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("couldn't open {path}: {source}")]
    ResourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} has no lines")]
    EmptyResource(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ResourceUnavailable { .. } => "resource_unavailable",
            Self::EmptyResource(_) => "empty_resource",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type returned by every command handler.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_engine_error_codes() {
        assert_eq!(EngineError::Closed.error_code(), "closed");
        let io_err = EngineError::from(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert_eq!(io_err.error_code(), "io");
        assert!(io_err.to_string().contains("reset"));
    }

    #[test]
    fn test_handler_error_display() {
        let err = HandlerError::ResourceUnavailable {
            path: "data/insults.txt".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(
            err.to_string(),
            "couldn't open data/insults.txt: file not found"
        );
        assert_eq!(err.error_code(), "resource_unavailable");
        assert_eq!(
            HandlerError::EmptyResource("x.txt".into()).to_string(),
            "x.txt has no lines"
        );
    }
}
