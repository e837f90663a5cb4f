//! The receive, frame, parse, dispatch and send loop.

use std::sync::Arc;

use chrono::Local;
use futures_util::SinkExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use slbot_proto::util::truncate_bytes;
use slbot_proto::{
    IgnoreReason, Line, LineFramer, Outbound, ParsedMessage, RECV_CHUNK, WireCodec, parse,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadHalf, WriteHalf};
use tokio_util::codec::FramedWrite;
use tracing::{debug, error, info, warn};

use super::Shutdown;
use crate::config::BotConfig;
use crate::error::EngineError;
use crate::handlers::{Context, Registry};
use crate::logging::{WIRE_TARGET, chat_line};

/// Longest channel name kept, in bytes.
pub const CHANNEL_MAX: usize = 254;

/// Per-connection state: the joined channel and the framing buffer.
#[derive(Debug)]
pub struct ConnectionState {
    channel: String,
    framer: LineFramer,
}

impl ConnectionState {
    pub fn new(channel: &str) -> Self {
        Self {
            channel: truncate_bytes(channel, CHANNEL_MAX).to_string(),
            framer: LineFramer::new(),
        }
    }

    /// The channel every reply is addressed to.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Frame a chunk, returning every complete line.
    fn frame(&mut self, chunk: &[u8]) -> Vec<Line> {
        self.framer.feed(chunk).collect()
    }
}

/// A bot connection over any byte stream.
pub struct Connection<S> {
    reader: ReadHalf<S>,
    writer: FramedWrite<WriteHalf<S>, WireCodec>,
    state: ConnectionState,
    bot: BotConfig,
    registry: Arc<Registry>,
    rng: StdRng,
    shutdown: Arc<Shutdown>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, bot: BotConfig, registry: Arc<Registry>, shutdown: Arc<Shutdown>) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self {
            reader,
            writer: FramedWrite::new(writer, WireCodec::new()),
            state: ConnectionState::new(&bot.channel),
            bot,
            registry,
            rng: StdRng::from_entropy(),
            shutdown,
        }
    }

    /// Replace the random source (for reproducible runs).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Write one command, mirroring it to the wire log first.
    pub async fn send(&mut self, msg: Outbound) -> Result<(), EngineError> {
        let wire = msg.to_string();
        for line in wire.split("\r\n").filter(|l| !l.is_empty()) {
            info!(target: WIRE_TARGET, "{}", line);
        }
        self.writer.send(msg).await?;
        Ok(())
    }

    /// Send the NICK/USER registration pair.
    pub async fn register(&mut self) -> Result<(), EngineError> {
        let msg = Outbound::register(&self.bot.nick, &self.bot.username, &self.bot.realname);
        self.send(msg).await
    }

    /// Join the configured channel.
    pub async fn join(&mut self) -> Result<(), EngineError> {
        let msg = Outbound::join(self.state.channel());
        self.send(msg).await
    }

    /// Leave the configured channel.
    pub async fn part(&mut self) -> Result<(), EngineError> {
        let msg = Outbound::part(self.state.channel());
        self.send(msg).await
    }

    /// Disconnect with the configured quit message.
    pub async fn quit(&mut self) -> Result<(), EngineError> {
        let msg = Outbound::quit(&self.bot.quit_message);
        self.send(msg).await
    }

    /// Run until the server closes the connection or shutdown is requested.
    ///
    /// Returns `Ok(())` after a requested shutdown (QUIT already sent) and
    /// an error on transport failure.
    pub async fn run(&mut self) -> Result<(), EngineError> {
        let mut chunk = [0u8; RECV_CHUNK];
        loop {
            if self.shutdown.is_requested() {
                info!("Shutdown requested, quitting");
                return self.quit().await;
            }

            let read = tokio::select! {
                result = self.reader.read(&mut chunk) => result?,
                () = self.shutdown.wait() => continue,
            };
            if read == 0 {
                return Err(EngineError::Closed);
            }

            for line in self.state.frame(&chunk[..read]) {
                if line.is_empty() {
                    continue;
                }
                if line.was_truncated() {
                    warn!(len = line.as_bytes().len(), "Oversized line truncated");
                }
                let replies = self.process_line(&line.text());
                for reply in replies {
                    self.send(reply).await?;
                }
            }
        }
    }

    /// Classify one line and collect the replies it calls for.
    fn process_line(&mut self, line: &str) -> Vec<Outbound> {
        info!(target: WIRE_TARGET, "{}", line);
        match parse(line) {
            ParsedMessage::Ping { token } => vec![Outbound::pong(token)],
            ParsedMessage::Ignorable {
                reason: IgnoreReason::ServerError,
            } => {
                warn!(line = %line, "Server sent an error");
                Vec::new()
            }
            ParsedMessage::Ignorable { reason } => {
                debug!(?reason, "Ignoring line");
                Vec::new()
            }
            ParsedMessage::Chat(event) => {
                info!(
                    target: WIRE_TARGET,
                    "{}",
                    chat_line(self.state.channel(), event.nick, event.text, &Local::now())
                );
                let mut replies = Vec::new();
                let mut ctx = Context::new(
                    event.nick,
                    &self.state.channel,
                    &self.registry,
                    &mut self.rng,
                    &mut replies,
                );
                if let Err(e) = self.registry.dispatch(&mut ctx, event.text) {
                    error!(nick = %event.nick, code = e.error_code(), "{}", e);
                }
                replies
            }
        }
    }

    /// Flush and shut down the write side. The socket closes when the
    /// connection is dropped.
    pub async fn close(mut self) {
        if let Err(e) = self.writer.close().await {
            debug!(error = %e, "Error while closing connection");
        }
    }
}
