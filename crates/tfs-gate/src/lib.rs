//! # tfs-gate
//!
//! Confirmation gate for mutating TinyFS operations.
//!
//! Before a write, delete, move, copy, or mkdir touches the filesystem, the
//! [`ConfirmationGate`] decides whether it may proceed: auto-approve
//! everything, delegate to a pluggable callback (a terminal prompt, a UI
//! dialog), or deny everything when nobody can answer a prompt.
//!
//! ## Quick Example
//!
//! ```rust
//! use tfs_gate::ConfirmationGate;
//!
//! let gate = ConfirmationGate::interactive(|operation, _details| {
//!     operation != "Delete File"
//! });
//! assert!(gate.confirm("Write File", "Writing 5 bytes to a.txt"));
//! assert!(!gate.confirm("Delete File", "Deleting file: a.txt"));
//! ```

pub mod gate;

pub use gate::{ConfirmFn, ConfirmationGate};
