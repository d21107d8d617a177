//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Only failures that reject or abort a whole job appear here. Recoverable
/// conditions (missing rule files, unreadable subtrees, individual source
/// files that cannot be read) are logged and absorbed, per the best-effort
/// traversal policy.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Represents an I/O error, typically from file system operations.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// Represents an error that occurred when a Tokio task was joined.
    /// This is often due to a task panicking or being cancelled.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// A generation job was invoked with an empty selection.
    #[error("Selection is empty")]
    EmptySelection,

    /// Represents a path that was expected to be a directory but was not.
    #[error("Path is not a valid directory: {0}")]
    NotADirectory(PathBuf),

    /// The output target was rejected before any write was attempted.
    #[error("Output target is not a usable path: {0}")]
    InvalidOutput(PathBuf),
}
