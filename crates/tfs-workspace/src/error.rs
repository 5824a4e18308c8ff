// error.rs — Error types for workspace path resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving a candidate path against the
/// workspace root.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The candidate path resolves outside the workspace (security violation).
    #[error("path '{path}' is outside workspace '{root}'")]
    OutsideWorkspace { path: String, root: PathBuf },

    /// The path does not exist but the operation requires it to.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Canonicalization or metadata lookup failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
