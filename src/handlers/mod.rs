//! Bot command handlers.
//!
//! This module contains the [`Handler`] trait, the [`Registry`] that maps
//! command names to handlers, and the built-in command catalog.
//!
//! Handlers are synchronous: each one runs to completion and queues its
//! replies on the [`Context`] before the next line is read.

mod context;
mod eightball;
mod help;
mod insult;
mod modules;
mod ping;
mod registry;
mod search;
mod smack;

pub use context::Context;
pub use eightball::{ANSWERS, EightBallHandler};
pub use help::{HELP_BUDGET, HelpHandler, catalog};
pub use insult::{INSULT_MAX, InsultHandler};
pub use modules::{ModuleError, PhraseHandler, load_modules};
pub use ping::PingHandler;
pub use registry::{Command, Invocation, Registry, TRIGGER};
pub use search::{GOOGLE_TEMPLATE, SEARCH_BUDGET, SearchHandler, TOO_LONG, WIKI_TEMPLATE};
pub use smack::{CRITICAL_SUFFIX, MAX_DAMAGE, SmackHandler, smack_text};

pub use crate::error::{HandlerError, HandlerResult};

/// A bot command.
pub trait Handler: Send + Sync {
    /// Run the command for `ctx.nick` with an optional argument.
    ///
    /// `argument` is `None` when nothing followed the command name. Replies
    /// are queued on `ctx`; errors are logged by the caller and never shown
    /// in the channel.
    fn handle(&self, ctx: &mut Context<'_>, argument: Option<&str>) -> HandlerResult;
}
