//! Command table and dispatch.
//!
//! The `Registry` holds every command the bot answers to, in registration
//! order (the order `!help` lists them), with an index for exact-name lookup.
//! It is built once at startup and only read afterwards.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::context::Context;
use super::eightball::EightBallHandler;
use super::help::HelpHandler;
use super::insult::InsultHandler;
use super::modules::load_modules;
use super::ping::PingHandler;
use super::search::SearchHandler;
use super::smack::SmackHandler;
use super::{Handler, HandlerResult};
use crate::config::CommandsConfig;

/// Marks a chat line as a bot command.
pub const TRIGGER: char = '!';

/// A registered command.
pub struct Command {
    name: String,
    usage: String,
    handler: Box<dyn Handler>,
}

impl Command {
    /// Command name, without the trigger.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line usage text shown by `!help <name>`.
    pub fn usage(&self) -> &str {
        &self.usage
    }
}

/// A command invocation split out of chat text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Token after the trigger.
    pub command: &'a str,
    /// Everything after the command with leading spaces stripped.
    /// `None` when nothing follows the command.
    pub argument: Option<&'a str>,
}

impl<'a> Invocation<'a> {
    /// Split `text`, returning `None` unless it starts with [`TRIGGER`] and
    /// names a command.
    ///
    /// Spaces between the trigger and the command are skipped. Only the
    /// single space ending the command is consumed before the argument, so
    /// `"!cmd "` has no argument while `"!cmd   "` has an empty one.
    pub fn parse(text: &'a str) -> Option<Self> {
        let body = text.strip_prefix(TRIGGER)?.trim_start_matches(' ');
        let (command, rest) = match body.split_once(' ') {
            Some((command, rest)) => (command, rest),
            None => (body, ""),
        };
        if command.is_empty() {
            return None;
        }
        let argument = (!rest.is_empty()).then(|| rest.trim_start_matches(' '));
        Some(Self { command, argument })
    }
}

/// Registry of command handlers.
pub struct Registry {
    commands: Vec<Command>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// A registry with no commands.
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The built-in catalog.
    pub fn with_builtins(config: &CommandsConfig) -> Self {
        let mut registry = Self::empty();
        registry.register("help", "USAGE: !help <command>", Box::new(HelpHandler));
        registry.register("ping", "USAGE: !ping", Box::new(PingHandler));
        registry.register("smack", "USAGE: !smack <person>", Box::new(SmackHandler));
        registry.register(
            "google",
            "USAGE: !google <search>",
            Box::new(SearchHandler::google()),
        );
        registry.register(
            "insult",
            "USAGE: !insult <person>",
            Box::new(InsultHandler::new(&config.insult_file)),
        );
        registry.register(
            "wiki",
            "USAGE: !wiki <search>",
            Box::new(SearchHandler::wiki()),
        );
        registry.register("8ball", "USAGE: !8ball <question>", Box::new(EightBallHandler));
        registry
    }

    /// Built-ins plus the phrase modules found in `config.module_dir`.
    pub fn new(config: &CommandsConfig) -> Self {
        let mut registry = Self::with_builtins(config);
        let loaded = load_modules(
            &mut registry,
            Path::new(&config.module_dir),
            config.max_modules,
        );
        debug!(
            commands = registry.len(),
            modules = loaded,
            "Command table ready"
        );
        registry
    }

    /// Add a command. Returns `false` (and keeps the existing entry) if the
    /// name is already taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        usage: impl Into<String>,
        handler: Box<dyn Handler>,
    ) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.commands.len());
        self.commands.push(Command {
            name,
            usage: usage.into(),
            handler,
        });
        true
    }

    /// Look up a command by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&i| &self.commands[i])
    }

    /// Usage text for `name`, if it is a command.
    pub fn usage(&self, name: &str) -> Option<&str> {
        self.get(name).map(Command::usage)
    }

    /// Command names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(Command::name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Dispatch chat `text` to its handler.
    ///
    /// Text without the trigger, an empty command, and unknown commands are
    /// all absorbed with `Ok(())`.
    pub fn dispatch(&self, ctx: &mut Context<'_>, text: &str) -> HandlerResult {
        let Some(invocation) = Invocation::parse(text) else {
            return Ok(());
        };
        match self.get(invocation.command) {
            Some(command) => {
                debug!(
                    command = %command.name,
                    nick = %ctx.nick,
                    has_argument = invocation.argument.is_some(),
                    "Dispatching command"
                );
                command.handler.handle(ctx, invocation.argument)
            }
            None => {
                debug!(command = %invocation.command, "Ignoring unknown command");
                Ok(())
            }
        }
    }
}
