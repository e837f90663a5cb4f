//! slbot binary: `slbot [config.toml]`.

use std::sync::Arc;

use anyhow::Context as _;
use slbot::config::{Config, validate};
use slbot::engine::{Connection, Shutdown};
use slbot::error::EngineError;
use slbot::handlers::Registry;
use slbot::logging;
use tokio::net::TcpStream;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "slbot.toml".to_string());

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {config_path}"))?;

    // Held until exit; dropping it flushes the log file.
    let _log_guard = logging::init(&config.logging)?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(path = %config_path, "{}", e);
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        nick = %config.bot.nick,
        channel = %config.bot.channel,
        "Starting slbot"
    );

    let registry = Arc::new(Registry::new(&config.commands));
    let shutdown = Arc::new(Shutdown::new());
    shutdown.listen_for_ctrl_c();

    let stream = TcpStream::connect((config.server.host.as_str(), config.server.port))
        .await
        .map_err(|e| {
            error!(host = %config.server.host, port = config.server.port, error = %e, "Failed to connect");
            e
        })?;
    info!("Connected");

    let mut conn = Connection::new(stream, config.bot.clone(), registry, shutdown);
    let result = async {
        conn.register().await?;
        conn.join().await?;
        conn.run().await
    }
    .await;
    conn.close().await;

    match result {
        Ok(()) => {
            info!("Disconnected");
            Ok(())
        }
        Err(EngineError::Closed) => {
            warn!("Server closed the connection");
            Err(EngineError::Closed.into())
        }
        Err(e) => {
            error!(code = e.error_code(), error = %e, "Connection failed");
            Err(e.into())
        }
    }
}
