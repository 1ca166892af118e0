//! Error types for config loading, merging and decoding.

use crate::Format;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors returned while retrieving, merging or querying config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The store could not produce the documents.
    #[error("failed to read config store: {0}")]
    Store(#[from] StoreError),
    /// The store returned no root document.
    #[error("root config document is empty or missing")]
    EmptyRoot,
    /// The declared format is neither JSON nor YAML.
    #[error("unsupported config format: {0:?}")]
    UnsupportedFormat(String),
    /// A document is not valid for its declared format.
    #[error("invalid {format} content in {label}: {message}")]
    Syntax {
        label: String,
        format: Format,
        message: String,
    },
    /// An active environment was requested but the store has no override for it.
    #[error("active environment {0} has no override document")]
    ActiveNotFound(String),
    /// Merge was invoked on invalid JSON input.
    #[error("failed to merge {label}: {message}")]
    Merge { label: String, message: String },
    /// A value could not be decoded into the requested shape.
    #[error("failed to decode {target}: {message}")]
    Decode { target: String, message: String },
    /// Bytes assigned to a `Raw` are not a JSON value.
    #[error("raw value is not valid json: {0}")]
    InvalidRaw(String),
    /// A construction option was rejected.
    #[error("invalid option {name}: {message}")]
    InvalidOption { name: String, message: String },
}

impl ConfigError {
    pub(crate) fn syntax(label: &str, format: Format, message: impl ToString) -> Self {
        ConfigError::Syntax {
            label: label.to_string(),
            format,
            message: message.to_string(),
        }
    }

    pub(crate) fn decode(target: impl Into<String>, message: impl ToString) -> Self {
        ConfigError::Decode {
            target: target.into(),
            message: message.to_string(),
        }
    }
}

/// Errors raised by [`Store`](crate::Store) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a path failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Walking a config directory failed.
    #[error("failed to walk config directory: {0}")]
    Walk(#[from] walkdir::Error),
}
