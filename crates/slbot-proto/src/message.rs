//! Classification of inbound protocol lines.
//!
//! The bot only cares about three things a server can send: liveness checks,
//! noise it should skip, and channel/private messages it may have to answer.
//! [`parse`] sorts a framed line into one of those, returning views into the
//! line rather than copies.
//!
//! Tokenization is strictly left to right:
//!
//! 1. `PING :<token>` is a ping.
//! 2. `NOTICE AUTH :` and `ERROR :` lines are skipped.
//! 3. Any line carrying a `\x01` byte is skipped (CTCP/ACTION framing).
//! 4. Lines without a `:` prefix are skipped.
//! 5. The nick is the text between the leading `:` and the first `!`
//!    (capped at [`NICK_MAX`] bytes). After the `!`, space separated tokens
//!    are scanned for a literal `PRIVMSG`; the text is whatever follows the
//!    next `:` (capped at [`TEXT_MAX`] bytes).
//!
//! ```
//! use slbot_proto::message::{parse, ChatEvent, ParsedMessage};
//!
//! let msg = parse(":nick!user@host PRIVMSG #chan :hello world");
//! assert_eq!(
//!     msg,
//!     ParsedMessage::Chat(ChatEvent { nick: "nick", text: "hello world" })
//! );
//! ```

use crate::ctcp::CTCP_DELIM;
use crate::util::truncate_bytes;

/// Longest nick kept from a prefix, in bytes.
pub const NICK_MAX: usize = 127;

/// Longest message text kept, in bytes.
pub const TEXT_MAX: usize = 511;

const PING_PREFIX: &str = "PING :";
const NOTICE_AUTH_PREFIX: &str = "NOTICE AUTH :";
const ERROR_PREFIX: &str = "ERROR :";
const PRIVMSG_MARKER: &str = "PRIVMSG";

/// Why a line was not routed anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// `NOTICE AUTH :` connection chatter.
    NoticeAuth,
    /// `ERROR :` line from the server.
    ServerError,
    /// The line carries the `\x01` control byte.
    ControlByte,
    /// No `:` prefix, so not a routable event.
    NoPrefix,
    /// Prefixed, but no `PRIVMSG` marker after the nick.
    NotPrivmsg,
    /// A `PRIVMSG` whose nick or text came out empty.
    EmptyField,
}

/// A routable user message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChatEvent<'a> {
    /// Sender nickname from the prefix segment.
    pub nick: &'a str,
    /// Message payload.
    pub text: &'a str,
}

/// Result of classifying one protocol line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsedMessage<'a> {
    /// Server liveness check; answer with `PONG :<token>`.
    Ping {
        /// Everything after `PING :`.
        token: &'a str,
    },
    /// Nothing to do.
    Ignorable {
        /// Which rule filtered the line.
        reason: IgnoreReason,
    },
    /// A user message, both fields non-empty.
    Chat(ChatEvent<'a>),
}

impl<'a> ParsedMessage<'a> {
    fn ignore(reason: IgnoreReason) -> Self {
        Self::Ignorable { reason }
    }

    /// The chat event, if this line is one.
    pub fn as_chat(&self) -> Option<&ChatEvent<'a>> {
        match self {
            Self::Chat(event) => Some(event),
            _ => None,
        }
    }
}

/// Classify a framed line (terminator already stripped).
pub fn parse(line: &str) -> ParsedMessage<'_> {
    if let Some(token) = line.strip_prefix(PING_PREFIX) {
        return ParsedMessage::Ping { token };
    }
    if line.starts_with(NOTICE_AUTH_PREFIX) {
        return ParsedMessage::ignore(IgnoreReason::NoticeAuth);
    }
    if line.starts_with(ERROR_PREFIX) {
        return ParsedMessage::ignore(IgnoreReason::ServerError);
    }
    if line.contains(CTCP_DELIM) {
        return ParsedMessage::ignore(IgnoreReason::ControlByte);
    }
    let Some(body) = line.strip_prefix(':') else {
        return ParsedMessage::ignore(IgnoreReason::NoPrefix);
    };

    // First `!` separates nick from user@host, even if more follow.
    let Some((nick, rest)) = body.split_once('!') else {
        return ParsedMessage::ignore(IgnoreReason::NotPrivmsg);
    };
    let nick = truncate_bytes(nick, NICK_MAX);

    let Some(after_marker) = after_privmsg_marker(rest) else {
        return ParsedMessage::ignore(IgnoreReason::NotPrivmsg);
    };
    let text = after_marker
        .trim_start_matches(':')
        .split_once(':')
        .map_or("", |(_target, text)| text);
    let text = truncate_bytes(text, TEXT_MAX);

    if nick.is_empty() || text.is_empty() {
        return ParsedMessage::ignore(IgnoreReason::EmptyField);
    }
    ParsedMessage::Chat(ChatEvent { nick, text })
}

/// Remainder of `rest` after the first space-delimited `PRIVMSG` token.
fn after_privmsg_marker(rest: &str) -> Option<&str> {
    let mut offset = 0;
    for token in rest.split(' ') {
        let end = offset + token.len();
        if token == PRIVMSG_MARKER {
            return Some(&rest[(end + 1).min(rest.len())..]);
        }
        offset = end + 1;
    }
    None
}
