//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {}: {source}", path.display())]
    ReadError {
        /// File that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the config file or its directory.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config {}: {source}", path.display())]
    ParseError {
        /// File with the malformed content.
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
