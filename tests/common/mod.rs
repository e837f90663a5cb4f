//! Integration test common infrastructure.
//!
//! Runs a bot [`Connection`] against the far end of an in-memory duplex
//! pipe, which plays the server.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use slbot::config::{BotConfig, CommandsConfig};
use slbot::engine::{Connection, Shutdown};
use slbot::error::EngineError;
use slbot::handlers::Registry;
use tokio::io::{
    AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf,
};
use tokio::task::JoinHandle;

const TIMEOUT: Duration = Duration::from_secs(5);

pub fn bot_config(channel: &str) -> BotConfig {
    BotConfig {
        nick: "slbot".into(),
        username: "slbot".into(),
        realname: "slbot irc bot".into(),
        channel: channel.into(),
        quit_message: "bye".into(),
    }
}

/// The server side of a running bot.
pub struct TestServer {
    reader: BufReader<ReadHalf<DuplexStream>>,
    writer: WriteHalf<DuplexStream>,
    pub shutdown: Arc<Shutdown>,
    pub bot: JoinHandle<Result<(), EngineError>>,
}

impl TestServer {
    /// Start a bot with the built-in commands and consume its
    /// registration and JOIN.
    pub async fn spawn(commands: CommandsConfig) -> Self {
        Self::spawn_with(Registry::with_builtins(&commands), 1).await
    }

    pub async fn spawn_with(registry: Registry, seed: u64) -> Self {
        let (client, server) = tokio::io::duplex(4096);
        let shutdown = Arc::new(Shutdown::new());
        let mut conn = Connection::new(
            client,
            bot_config("#c"),
            Arc::new(registry),
            Arc::clone(&shutdown),
        )
        .with_rng(StdRng::seed_from_u64(seed));

        let bot = tokio::spawn(async move {
            conn.register().await?;
            conn.join().await?;
            let result = conn.run().await;
            conn.close().await;
            result
        });

        let (reader, writer) = tokio::io::split(server);
        let mut server = Self {
            reader: BufReader::new(reader),
            writer,
            shutdown,
            bot,
        };
        server.expect("NICK slbot\r\n").await;
        server.expect("USER slbot localhost 0 :slbot irc bot\r\n").await;
        server.expect("JOIN #c\r\n").await;
        server
    }

    /// Write raw bytes to the bot.
    pub async fn send(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).await.expect("write to bot");
        self.writer.flush().await.expect("flush to bot");
    }

    /// Next line the bot sent, CRLF included.
    pub async fn recv(&mut self) -> String {
        let mut line = String::new();
        let read = tokio::time::timeout(TIMEOUT, self.reader.read_line(&mut line))
            .await
            .expect("timed out waiting for the bot")
            .expect("read from bot");
        assert!(read > 0, "bot closed the connection");
        line
    }

    pub async fn expect(&mut self, line: &str) {
        assert_eq!(self.recv().await, line);
    }

    /// Close both directions and return how the bot's run loop ended.
    pub async fn hang_up(self) -> Result<(), EngineError> {
        let Self {
            reader, writer, bot, ..
        } = self;
        drop(reader);
        drop(writer);
        tokio::time::timeout(TIMEOUT, bot)
            .await
            .expect("bot should stop")
            .expect("bot task panicked")
    }
}
