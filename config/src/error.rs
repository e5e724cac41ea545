//! Error types for override files.
//!
//! Covers reading and decoding the file as well as applying it to a
//! [`FlagSet`](flagset_core::FlagSet).

use flagset_core::FlagError;
use thiserror::Error;

/// Errors that can occur while loading or applying overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The flag set rejected a value.
    #[error(transparent)]
    Flag(#[from] FlagError),

    /// The file names a flag the flag set does not define.
    #[error("override for undefined flag: {0}")]
    UnknownFlag(String),

    /// A list of values for a flag that holds a single value.
    #[error("flag --{name} holds a single value but the override lists {count}")]
    NotASlice {
        /// Flag name without dashes.
        name: String,
        /// Number of values in the override.
        count: usize,
    },

    /// The file declares a format version this crate cannot read.
    #[error("unsupported override format version: {0}")]
    UnsupportedVersion(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
