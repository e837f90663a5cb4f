//! Handler context.
//!
//! Defines the [`Context`] passed to every handler: who invoked the command,
//! where replies go, the command table (for `!help`), and the random source.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use slbot_proto::Outbound;

use super::registry::Registry;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// Nick of the user who sent the command.
    pub nick: &'a str,
    /// Channel the bot answers in.
    pub channel: &'a str,
    /// Command table.
    pub registry: &'a Registry,
    /// Random source for randomized commands.
    pub rng: &'a mut dyn RngCore,
    replies: &'a mut Vec<Outbound>,
}

impl<'a> Context<'a> {
    /// Create a new context. Replies are appended to `replies`.
    pub fn new(
        nick: &'a str,
        channel: &'a str,
        registry: &'a Registry,
        rng: &'a mut dyn RngCore,
        replies: &'a mut Vec<Outbound>,
    ) -> Self {
        Self {
            nick,
            channel,
            registry,
            rng,
            replies,
        }
    }

    /// Queue a plain message to the channel.
    pub fn reply(&mut self, text: impl Into<String>) {
        self.replies.push(Outbound::privmsg(self.channel, text));
    }

    /// Queue an action to the channel.
    pub fn action(&mut self, text: impl Into<String>) {
        self.replies.push(Outbound::action(self.channel, text));
    }

    /// Uniform integer in `low..=high`.
    pub fn roll(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }

    /// Uniform index in `0..len`.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    pub fn choose<'s, T>(&mut self, items: &'s [T]) -> Option<&'s T> {
        items.choose(&mut *self.rng)
    }

    /// Replies queued so far.
    pub fn replies(&self) -> &[Outbound] {
        self.replies
    }
}
