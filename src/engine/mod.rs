//! Connection engine.
//!
//! One [`Connection`] owns the socket, the line framer and the joined
//! channel. Its run loop reads a chunk, frames it into lines, answers
//! `PING`s, dispatches chat commands and writes the replies, one line at a
//! time, until the server goes away or [`Shutdown`] is requested.

mod connection;
mod shutdown;

pub use connection::{CHANNEL_MAX, Connection, ConnectionState};
pub use shutdown::Shutdown;
