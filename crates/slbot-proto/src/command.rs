//! Outbound command rendering.
//!
//! Every command the bot sends is an [`Outbound`] value whose `Display`
//! output is the exact wire form, CRLF included. Field values are cut at the
//! first `\r` or `\n` so a single value can never smuggle a second command
//! onto the wire.
//!
//! ```
//! use slbot_proto::Outbound;
//!
//! assert_eq!(Outbound::pong("abc").to_string(), "PONG :abc\r\n");
//! assert_eq!(
//!     Outbound::privmsg("#c", "pong").to_string(),
//!     "PRIVMSG #c :pong\r\n"
//! );
//! ```

use std::fmt::{self, Write};

use crate::ctcp::Ctcp;

/// A command the bot sends to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outbound {
    /// `PRIVMSG <target> :<text>`
    Privmsg {
        /// Channel or nick.
        target: String,
        /// Message body.
        text: String,
    },
    /// `PRIVMSG <target> :\x01ACTION <text>\x01`
    Action {
        /// Channel or nick.
        target: String,
        /// What the bot does, in third person.
        text: String,
    },
    /// `JOIN <channel>`
    Join(String),
    /// `PART <channel>`
    Part(String),
    /// `NICK <nick>`
    Nick(String),
    /// `QUIT :<reason>`
    Quit(String),
    /// `TOPIC <channel> :<topic>`
    Topic {
        /// Channel whose topic is set.
        channel: String,
        /// New topic; empty clears it.
        topic: String,
    },
    /// `PONG :<token>`
    Pong(String),
    /// The registration pair: `NICK <nick>` then
    /// `USER <username> localhost 0 :<realname>`.
    Register {
        /// Requested nickname.
        nick: String,
        /// Ident / username.
        username: String,
        /// Free-form real name.
        realname: String,
    },
}

impl Outbound {
    /// Plain message to a channel or nick.
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Privmsg {
            target: target.into(),
            text: text.into(),
        }
    }

    /// `/me`-style action to a channel or nick.
    pub fn action(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Action {
            target: target.into(),
            text: text.into(),
        }
    }

    /// Join a channel.
    pub fn join(channel: impl Into<String>) -> Self {
        Self::Join(channel.into())
    }

    /// Leave a channel.
    pub fn part(channel: impl Into<String>) -> Self {
        Self::Part(channel.into())
    }

    /// Change nickname.
    pub fn nick(nick: impl Into<String>) -> Self {
        Self::Nick(nick.into())
    }

    /// Disconnect with a reason.
    pub fn quit(reason: impl Into<String>) -> Self {
        Self::Quit(reason.into())
    }

    /// Set (or clear, with an empty string) a channel topic.
    pub fn topic(channel: impl Into<String>, topic: impl Into<String>) -> Self {
        Self::Topic {
            channel: channel.into(),
            topic: topic.into(),
        }
    }

    /// Answer a server `PING`.
    pub fn pong(token: impl Into<String>) -> Self {
        Self::Pong(token.into())
    }

    /// Connection registration.
    pub fn register(
        nick: impl Into<String>,
        username: impl Into<String>,
        realname: impl Into<String>,
    ) -> Self {
        Self::Register {
            nick: nick.into(),
            username: username.into(),
            realname: realname.into(),
        }
    }

    /// The command keyword, for logging.
    pub fn command_name(&self) -> &'static str {
        match self {
            Self::Privmsg { .. } | Self::Action { .. } => "PRIVMSG",
            Self::Join(_) => "JOIN",
            Self::Part(_) => "PART",
            Self::Nick(_) | Self::Register { .. } => "NICK",
            Self::Quit(_) => "QUIT",
            Self::Topic { .. } => "TOPIC",
            Self::Pong(_) => "PONG",
        }
    }
}

/// Write `value` up to its first line terminator.
pub(crate) fn write_field<W: Write>(w: &mut W, value: &str) -> fmt::Result {
    let end = value.find(&['\r', '\n'][..]).unwrap_or(value.len());
    w.write_str(&value[..end])
}

impl fmt::Display for Outbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Privmsg { target, text } => {
                f.write_str("PRIVMSG ")?;
                write_field(f, target)?;
                f.write_str(" :")?;
                write_field(f, text)?;
            }
            Self::Action { target, text } => {
                f.write_str("PRIVMSG ")?;
                write_field(f, target)?;
                f.write_str(" :")?;
                let mut body = String::with_capacity(text.len());
                write_field(&mut body, text)?;
                write!(f, "{}", Ctcp::action(&body))?;
            }
            Self::Join(channel) => {
                f.write_str("JOIN ")?;
                write_field(f, channel)?;
            }
            Self::Part(channel) => {
                f.write_str("PART ")?;
                write_field(f, channel)?;
            }
            Self::Nick(nick) => {
                f.write_str("NICK ")?;
                write_field(f, nick)?;
            }
            Self::Quit(reason) => {
                f.write_str("QUIT :")?;
                write_field(f, reason)?;
            }
            Self::Topic { channel, topic } => {
                f.write_str("TOPIC ")?;
                write_field(f, channel)?;
                f.write_str(" :")?;
                write_field(f, topic)?;
            }
            Self::Pong(token) => {
                f.write_str("PONG :")?;
                write_field(f, token)?;
            }
            Self::Register {
                nick,
                username,
                realname,
            } => {
                f.write_str("NICK ")?;
                write_field(f, nick)?;
                f.write_str("\r\nUSER ")?;
                write_field(f, username)?;
                f.write_str(" localhost 0 :")?;
                write_field(f, realname)?;
            }
        }
        f.write_str("\r\n")
    }
}
