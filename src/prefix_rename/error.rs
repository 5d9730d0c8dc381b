//! Error types for prefix rename operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that stop the run before any item is touched.
#[derive(Debug, Error)]
pub enum PrefixRenameError {
    #[error("Missing required prefix argument")]
    MissingPrefix,

    #[error("Directory does not exist or is not a directory: '{}'", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to get current working directory: {0}")]
    CurrentDirectory(#[source] io::Error),

    #[error("Failed to read directory '{}': {source}", path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Per-item errors. These are reported and counted, and processing continues with the next item.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("target name already exists: {}", .0.display())]
    NameCollision(PathBuf),

    #[error("backup failed ({}): {source:#}", backup.display())]
    BackupFailed {
        backup: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("move failed ({}): {source}", target.display())]
    MoveFailed {
        target: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PrefixRenameError {
    /// True for errors caused by invalid command line input,
    /// which should be followed by the usage help.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::MissingPrefix)
    }
}
