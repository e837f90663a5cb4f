//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server to connect to.
    pub server: ServerConfig,
    /// Identity and channel.
    pub bot: BotConfig,
    /// Command resources (insult file, phrase modules).
    #[serde(default)]
    pub commands: CommandsConfig,
    /// Diagnostic log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Upstream server address.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Hostname or IP address (e.g., "irc.libera.chat").
    pub host: String,
    /// Plaintext port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Bot identity.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Nickname sent at registration.
    pub nick: String,
    /// Ident sent in the USER line.
    #[serde(default = "default_username")]
    pub username: String,
    /// Real name sent in the USER line.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// The single channel the bot joins and answers in.
    pub channel: String,
    /// Reason sent with QUIT on shutdown.
    #[serde(default = "default_quit_message")]
    pub quit_message: String,
}

/// Resources used by file-backed commands.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// One insult per line, read on every `!insult`.
    #[serde(default = "default_insult_file")]
    pub insult_file: String,
    /// Directory scanned for `*.txt` phrase modules at startup.
    #[serde(default = "default_module_dir")]
    pub module_dir: String,
    /// Upper bound on loaded phrase modules.
    #[serde(default = "default_max_modules")]
    pub max_modules: usize,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            insult_file: default_insult_file(),
            module_dir: default_module_dir(),
            max_modules: default_max_modules(),
        }
    }
}

/// Diagnostic log configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g., "info", "slbot=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append-only log file. Set to `""` to disable.
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    /// Also write to stdout.
    #[serde(default = "default_true")]
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
            stdout: default_true(),
        }
    }
}

impl LoggingConfig {
    /// The log file path, if file logging is enabled.
    pub fn file_path(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Path::new)
    }
}
