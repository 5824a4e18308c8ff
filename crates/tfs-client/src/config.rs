// config.rs — Client configuration.

use std::path::PathBuf;

use tfs_audit::DEFAULT_CAPACITY;

/// Configuration for an [`FsClient`](crate::FsClient), passed explicitly at
/// construction. Environment and CLI parsing belong to the caller.
#[derive(Debug, Clone)]
pub struct FsConfig {
    /// Root directory all operations are confined to; created if absent.
    pub workspace_dir: PathBuf,

    /// Approve every mutation without consulting an interactive gate.
    pub auto_confirm: bool,

    /// Maximum number of records retained in the audit trail.
    pub history_size: usize,
}

impl FsConfig {
    /// Configuration with defaults: confirmations required, 100-record
    /// history.
    pub fn new(workspace_dir: impl Into<PathBuf>) -> Self {
        Self {
            workspace_dir: workspace_dir.into(),
            auto_confirm: false,
            history_size: DEFAULT_CAPACITY,
        }
    }

    /// Set the auto-confirm flag and return self.
    pub fn auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }

    /// Set the history capacity and return self.
    pub fn history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self
    }
}
