// info.rs — FileInfo: a fresh snapshot of one directory entry.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a file or directory. Computed fresh per query, never
/// cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    /// Final path component.
    pub name: String,

    /// Workspace-relative path.
    pub path: String,

    /// Whether this entry is a directory.
    pub is_directory: bool,

    /// Size in bytes; `None` for directories.
    pub size: Option<u64>,

    /// Last modification time, when the platform reports one.
    pub modified: Option<DateTime<Utc>>,
}

impl FileInfo {
    /// Build a `FileInfo` from a resolved path and its workspace-relative
    /// display form.
    pub(crate) fn from_path(resolved: &Path, relative: String) -> std::io::Result<Self> {
        let metadata = resolved.metadata()?;
        let is_directory = metadata.is_dir();
        Ok(Self {
            name: resolved
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| relative.clone()),
            path: relative,
            is_directory,
            size: if is_directory { None } else { Some(metadata.len()) },
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        })
    }
}
