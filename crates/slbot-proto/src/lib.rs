//! # slbot-proto
//!
//! The protocol side of the slbot IRC bot: turning a raw byte stream into
//! lines, lines into classified messages, and bot replies into wire-exact
//! commands. Nothing here touches a socket; the bot binary owns the
//! transport and drives these pieces.
//!
//! ## Features
//!
//! - Fixed-buffer line framing with truncation of oversized lines
//! - Left-to-right classification of PING, noise and PRIVMSG lines
//! - Outbound command rendering, CTCP ACTION envelopes included
//! - Budgeted percent-encoding for search links
//! - Optional tokio `Encoder` for writing commands through a `FramedWrite`
//!
//! ## Quick Start
//!
//! ```rust
//! use slbot_proto::{parse, LineFramer, Outbound, ParsedMessage};
//!
//! let mut framer = LineFramer::new();
//! let mut replies = Vec::new();
//!
//! for line in framer.feed(b"PING :irc.example.net\r\n") {
//!     if line.is_empty() {
//!         continue;
//!     }
//!     if let ParsedMessage::Ping { token } = parse(&line.text()) {
//!         replies.push(Outbound::pong(token));
//!     }
//! }
//!
//! assert_eq!(replies[0].to_string(), "PONG :irc.example.net\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

#[cfg(feature = "tokio")]
pub mod codec;
pub mod command;
pub mod ctcp;
pub mod encode;
pub mod error;
pub mod line;
pub mod message;
pub mod urlencode;
pub mod util;

#[cfg(feature = "tokio")]
pub use self::codec::WireCodec;
pub use self::command::Outbound;
pub use self::ctcp::{Ctcp, CtcpKind};
pub use self::encode::IrcEncode;
pub use self::error::{EncodeError, ProtocolError};
pub use self::line::{Line, LineFramer, BUFFER_CAPACITY, MAX_LINE_LEN, RECV_CHUNK};
pub use self::message::{parse, ChatEvent, IgnoreReason, ParsedMessage};
pub use self::urlencode::{percent_decode, percent_encode, query_url};
