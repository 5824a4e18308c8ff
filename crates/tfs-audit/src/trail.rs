// trail.rs — Bounded, append-only audit trail.
//
// An in-memory ring of the most recent records: append at the back, evict
// from the front once capacity is exceeded. The interior mutex lets
// `record` take `&self`, so an interactive command loop and a background
// watcher can share one client without external locking.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::record::ActionRecord;

/// Default number of records retained when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded, append-only ledger of performed operations.
pub struct AuditTrail {
    capacity: usize,
    entries: Mutex<VecDeque<ActionRecord>>,
}

impl AuditTrail {
    /// Create a trail retaining at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY))),
        }
    }

    /// Append a record, evicting the oldest entries once over capacity.
    pub fn record(&self, record: ActionRecord) {
        tracing::debug!(
            "recording action: {:?} {} (success: {})",
            record.action,
            record.target,
            record.success
        );
        let mut entries = self.lock_entries();
        entries.push_back(record);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Snapshot of the trail, oldest first / newest last. A defensive copy:
    /// the caller cannot mutate the trail through it.
    pub fn history(&self) -> Vec<ActionRecord> {
        self.lock_entries().iter().cloned().collect()
    }

    /// Number of records currently retained.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether the trail holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // A poisoned lock only means another writer panicked mid-append; the
    // deque itself is still valid, so recover it rather than propagate.
    fn lock_entries(&self) -> MutexGuard<'_, VecDeque<ActionRecord>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
