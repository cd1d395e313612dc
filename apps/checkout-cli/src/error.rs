//! # Application Error Type
//!
//! Failures that happen around the engine, never inside it.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in checkout-cli                           │
//! │                                                                         │
//! │  Config load ──── unreadable / bad TOML / invalid ───► AppError ──┐    │
//! │       │                                                           │    │
//! │       ▼                                                           │    │
//! │  Read input ───── missing file / not JSON ──────────► AppError ──┤    │
//! │       │                                                           │    │
//! │       ▼                                                           │    │
//! │  execute ──────── every outcome is a CartResponse (never Err)     │    │
//! │       │                                                           │    │
//! │       ▼                                                           ▼    │
//! │  Write output ─── unwritable file ───────────────────► AppError ──► exit 1
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Business failures such as "Item not found in cart." travel inside the
//! result file as `{result:false}` and are not errors here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a run before or after the engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading a file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not a JSON command record. A record with a
    /// missing or non-string `command` still decodes.
    #[error("invalid command file {path}: {source}")]
    InvalidCommand {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`](crate::config::AppConfig).
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config loaded but fails validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Encoding the result failed.
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AppError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Write {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        AppError::InvalidConfig(message.into())
    }
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
