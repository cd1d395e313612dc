//! # Storage Error Types
//!
//! Error types for saving cart snapshots.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the path that failed                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError::SaveFailed (engine) ← Becomes a {result:false} response    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loads never produce a `StoreError`: an unreadable snapshot is an empty
//! cart.

use std::path::PathBuf;

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing the snapshot or creating its directory failed.
    ///
    /// ## When This Occurs
    /// - Parent directory cannot be created
    /// - File permissions issue
    /// - Disk full
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cart could not be encoded as JSON.
    #[error("failed to encode cart: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates an Io error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = StoreError::io(
            "/data/db.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(err.to_string(), "failed to write /data/db.json: permission denied");
    }
}
