//! CTCP envelope for outbound actions.
//!
//! An action ("/me waves") travels as a PRIVMSG whose text is wrapped in
//! `\x01` delimiters with an `ACTION` keyword. Inbound lines carrying the
//! delimiter are filtered by the parser, so only the encoding side lives here.
//!
//! # Example
//!
//! ```
//! use slbot_proto::ctcp::Ctcp;
//!
//! let action = Ctcp::action("dances");
//! assert_eq!(action.to_string(), "\x01ACTION dances\x01");
//! ```

use std::fmt;

/// The CTCP delimiter character (`\x01`).
pub(crate) const CTCP_DELIM: char = '\x01';

/// CTCP command types the bot emits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CtcpKind {
    /// ACTION - third-person description of what the sender does.
    Action,
}

impl CtcpKind {
    /// Returns the canonical uppercase name of this CTCP command.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Action => "ACTION",
        }
    }
}

impl fmt::Display for CtcpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CTCP message body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctcp<'a> {
    /// The CTCP command type.
    pub kind: CtcpKind,
    /// Optional parameters following the command.
    pub params: Option<&'a str>,
}

impl<'a> Ctcp<'a> {
    /// Create an ACTION CTCP message.
    pub fn action(text: &'a str) -> Self {
        Self {
            kind: CtcpKind::Action,
            params: Some(text),
        }
    }
}

impl fmt::Display for Ctcp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CTCP_DELIM}{}", self.kind)?;
        if let Some(params) = self.params {
            write!(f, " {}", params)?;
        }
        write!(f, "{CTCP_DELIM}")
    }
}
