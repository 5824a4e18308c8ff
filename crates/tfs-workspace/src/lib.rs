//! # tfs-workspace
//!
//! Workspace containment boundary for TinyFS.
//!
//! Every path an agent supplies is untrusted. [`WorkspaceRoot`] resolves a
//! candidate path against the workspace directory and rejects anything whose
//! canonical form escapes it — traversal sequences, absolute paths outside
//! the root, and symlinks pointing out of the workspace all fail before any
//! OS call can happen.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use tfs_workspace::WorkspaceRoot;
//!
//! let root = WorkspaceRoot::new("/tmp/ws").unwrap();
//! let resolved = root.resolve("notes/todo.txt", false).unwrap();
//! assert!(resolved.starts_with(root.path()));
//! ```

pub mod error;
pub mod root;

pub use error::WorkspaceError;
pub use root::WorkspaceRoot;
