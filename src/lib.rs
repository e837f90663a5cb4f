//! slbot - Straylight IRC bot
//!
//! A single-channel IRC bot: connects, registers, joins one channel and
//! answers `!` commands. The protocol pieces (framing, parsing, command
//! rendering) live in the `slbot-proto` crate; this crate owns the
//! connection, the command table and the ambient setup.

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod logging;
