//! Error types for the store crate
//!
//! Reducers never fail; service failures become actions. What remains is
//! configuration loading and the spawned-store channel.

/// Spawned store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store task has stopped
    #[error("store closed")]
    Closed,

    /// The store task panicked or was aborted
    #[error("store task failed: {0}")]
    TaskFailed(String),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::AppConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}
