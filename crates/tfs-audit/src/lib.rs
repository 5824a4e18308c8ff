//! # tfs-audit
//!
//! Bounded, append-only action trail for TinyFS.
//!
//! Every filesystem operation an agent performs — successful, failed, or
//! cancelled — is recorded as an [`ActionRecord`] in an in-memory
//! [`AuditTrail`]. The trail keeps the most recent records up to a
//! configured capacity (oldest evicted first) and is safe to append to
//! from multiple threads.
//!
//! ## Quick Example
//!
//! ```rust
//! use tfs_audit::{ActionRecord, ActionType, AuditTrail};
//!
//! let trail = AuditTrail::new(100);
//! trail.record(ActionRecord::success(ActionType::Write, "notes/todo.txt"));
//! assert_eq!(trail.history().len(), 1);
//! ```

pub mod record;
pub mod trail;

pub use record::{ActionRecord, ActionType};
pub use trail::{AuditTrail, DEFAULT_CAPACITY};
