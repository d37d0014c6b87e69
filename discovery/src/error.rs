//! Error types for manpage loading, configuration and launching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reading a manual page from disk.
#[derive(Debug, Error)]
pub enum SourceError {
    /// File could not be opened or read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decompressed or plain content was not valid UTF-8.
    #[error("'{0}' is not valid UTF-8")]
    NotUtf8(PathBuf),
}

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Errors running the external executable.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program is not on `PATH`. Recoverable: the operator can fix the
    /// setting and retry.
    #[error("{program} executable not found in PATH")]
    ExecutableNotFound { program: String },

    /// Spawning failed for another reason (permissions, bad format, ...).
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed.
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
