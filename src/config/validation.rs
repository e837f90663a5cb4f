//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must be non-zero")]
    ZeroPort,
    #[error("bot.nick is required")]
    MissingNick,
    #[error("bot.nick must not contain spaces, got '{0}'")]
    NickHasSpace(String),
    #[error("bot.channel is required")]
    MissingChannel,
    #[error("bot.channel must start with '#' or '&', got '{0}'")]
    InvalidChannelPrefix(String),
    #[error("commands.max_modules must be at least 1")]
    ZeroModuleLimit,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let nick = &config.bot.nick;
    if nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    } else if nick.contains(' ') {
        errors.push(ValidationError::NickHasSpace(nick.clone()));
    }

    let channel = &config.bot.channel;
    if channel.is_empty() {
        errors.push(ValidationError::MissingChannel);
    } else if !channel.starts_with(['#', '&']) {
        errors.push(ValidationError::InvalidChannelPrefix(channel.clone()));
    }

    if config.commands.max_modules == 0 {
        errors.push(ValidationError::ZeroModuleLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
