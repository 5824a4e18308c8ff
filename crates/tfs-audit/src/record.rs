// record.rs — Action record data model.
//
// One record per performed operation, written after the outcome is known.
// Records are immutable once created; the trail never rewrites history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of action a record describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// A file or directory was inspected (read, list, info).
    Read,
    /// The filesystem was mutated (write, mkdir, delete, move, copy).
    Write,
    /// A command was executed. Recorded by the command layer, not by
    /// filesystem operations.
    Execute,
    /// A git operation performed on the workspace.
    Git,
    /// An environment variable change.
    Env,
}

/// One entry in the audit trail — immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Unique identifier for this record.
    pub record_id: Uuid,

    /// When the operation finished (UTC).
    pub timestamp: DateTime<Utc>,

    /// What kind of action was performed.
    pub action: ActionType,

    /// The workspace-relative target: a single path, or `"src -> dest"`
    /// for move and copy.
    pub target: String,

    /// Whether the operation succeeded.
    pub success: bool,

    /// The underlying error message when it did not.
    pub error_message: Option<String>,

    /// Whether the confirmation gate approved the operation. False when the
    /// gate was bypassed or never consulted (read-only operations).
    pub user_approved: bool,
}

impl ActionRecord {
    /// A record for an operation that completed successfully.
    pub fn success(action: ActionType, target: impl Into<String>) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            action,
            target: target.into(),
            success: true,
            error_message: None,
            user_approved: false,
        }
    }

    /// A record for an operation that failed or was cancelled.
    pub fn failure(
        action: ActionType,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            action,
            target: target.into(),
            success: false,
            error_message: Some(message.into()),
            user_approved: false,
        }
    }

    /// Set the approval flag and return self (builder pattern).
    pub fn with_approval(mut self, approved: bool) -> Self {
        self.user_approved = approved;
        self
    }
}
