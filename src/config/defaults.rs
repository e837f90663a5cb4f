//! Default value functions for configuration.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_port() -> u16 {
    6667
}

// =============================================================================
// Identity Defaults
// =============================================================================

pub fn default_username() -> String {
    "slbot".to_string()
}

pub fn default_realname() -> String {
    "slbot irc bot".to_string()
}

pub fn default_quit_message() -> String {
    "bye".to_string()
}

// =============================================================================
// Command Defaults
// =============================================================================

pub fn default_insult_file() -> String {
    "data/insults.txt".to_string()
}

pub fn default_module_dir() -> String {
    "./mod".to_string()
}

pub fn default_max_modules() -> usize {
    16
}

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_file() -> Option<String> {
    Some("slbot_log.txt".to_string())
}
