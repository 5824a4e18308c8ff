//! # tfs-client
//!
//! Sandboxed filesystem operations for LLM-driven agents.
//!
//! [`FsClient`] is the façade over the whole stack: every operation resolves
//! its path through the workspace containment boundary, mutations pass the
//! confirmation gate, and exactly one [`tfs_audit::ActionRecord`] is written
//! once the outcome is known — success, failure, or cancellation.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use tfs_client::{FsClient, FsConfig};
//!
//! let client = FsClient::new(FsConfig::new("/tmp/ws").auto_confirm(true)).unwrap();
//! client.write_file("notes/todo.txt", "ship it", true).unwrap();
//! let content = client.read_file("notes/todo.txt").unwrap();
//! assert_eq!(content, "ship it");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod info;

pub use client::FsClient;
pub use config::FsConfig;
pub use error::FsError;
pub use info::FileInfo;
