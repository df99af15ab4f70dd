//! Error types for tvgrid.

use std::io;

/// Errors produced by the launcher.
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("package not found: {0}")]
    NotFound(String),

    #[error("package not launchable: {0}")]
    NotLaunchable(String),

    #[error("slot position {position} out of range (grid has {slots} slots)")]
    InvalidPosition { position: usize, slots: usize },

    #[error("platform error: {0}")]
    Platform(String),

    #[error("preferences error: {0}")]
    Prefs(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("worker error: {0}")]
    Worker(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LauncherError>;
