// error.rs — Error taxonomy for sandboxed filesystem operations.
//
// Security violations (OutsideWorkspace) and user cancellation (Cancelled)
// are distinct variants — callers must be able to tell an agent probing
// outside its sandbox apart from a human saying no.

use std::path::PathBuf;
use thiserror::Error;

use tfs_workspace::WorkspaceError;

/// Errors produced by sandboxed filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    /// The path does not exist.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// The path resolves outside the workspace. Security family: the
    /// operation never reached the OS.
    #[error("path '{path}' is outside workspace '{root}'")]
    OutsideWorkspace { path: String, root: PathBuf },

    /// A file operation was attempted on a directory.
    #[error("is a directory: {path}")]
    IsADirectory { path: PathBuf },

    /// A directory operation was attempted on a non-directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The confirmation gate declined the operation.
    #[error("{operation} cancelled by user")]
    Cancelled { operation: String },

    /// The underlying OS call failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<WorkspaceError> for FsError {
    fn from(err: WorkspaceError) -> Self {
        match err {
            WorkspaceError::OutsideWorkspace { path, root } => {
                FsError::OutsideWorkspace { path, root }
            }
            WorkspaceError::NotFound { path } => FsError::NotFound { path },
            WorkspaceError::Io { path, source } => FsError::Io { path, source },
        }
    }
}

impl FsError {
    /// Whether this is a containment violation rather than an ordinary
    /// failure.
    pub fn is_security(&self) -> bool {
        matches!(self, FsError::OutsideWorkspace { .. })
    }
}
