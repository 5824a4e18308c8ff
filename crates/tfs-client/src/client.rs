// client.rs — FsClient: sandboxed filesystem operations for agents.
//
// Every operation follows the same shape:
//
//   resolve path (containment, always)
//     → confirmation gate (mutations only, unless bypassed per call)
//       → OS call
//         → exactly one ActionRecord, written after the outcome is known
//
// The record is written for successes, failures, and cancellations alike;
// a mutation is never silent. Validation failures (outside workspace,
// missing required path) happen before a record exists and propagate as-is.
//
// There is no cross-call atomicity: a move and a read on related paths may
// interleave arbitrarily. Callers needing transactions don't get them here.

use std::fs;
use std::path::Path;

use tfs_audit::{ActionRecord, ActionType, AuditTrail};
use tfs_gate::ConfirmationGate;
use tfs_workspace::WorkspaceRoot;

use crate::config::FsConfig;
use crate::error::FsError;
use crate::info::FileInfo;

/// Number of content characters shown in a write confirmation preview.
const PREVIEW_CHARS: usize = 100;

/// Sandboxed filesystem client confined to a workspace directory.
///
/// All methods take `&self`; the audit trail is internally guarded, so the
/// client can be shared behind an `Arc` by concurrent callers (an
/// interactive command loop and a background watcher, say) without external
/// locking. Every call executes synchronously on the caller's thread and
/// may block on disk I/O; there is no per-call cancellation or timeout.
pub struct FsClient {
    workspace: WorkspaceRoot,
    gate: ConfirmationGate,
    trail: AuditTrail,
}

impl FsClient {
    /// Create a client rooted at `config.workspace_dir`.
    ///
    /// The workspace directory is created if it does not exist — plain
    /// setup, not a security check. Without `auto_confirm` the client
    /// starts with a deny-all gate; attach an interactive one with
    /// [`with_gate`](Self::with_gate).
    pub fn new(config: FsConfig) -> Result<Self, FsError> {
        if !config.workspace_dir.exists() {
            tracing::info!(
                "creating workspace directory: {}",
                config.workspace_dir.display()
            );
            fs::create_dir_all(&config.workspace_dir).map_err(|source| FsError::Io {
                path: config.workspace_dir.clone(),
                source,
            })?;
        }

        let workspace = WorkspaceRoot::new(&config.workspace_dir)?;
        let gate = if config.auto_confirm {
            ConfirmationGate::auto_approve()
        } else {
            ConfirmationGate::deny_all()
        };

        tracing::info!("initialized client with workspace: {}", workspace.path().display());

        Ok(Self {
            workspace,
            gate,
            trail: AuditTrail::new(config.history_size),
        })
    }

    /// Replace the confirmation gate, e.g. with a terminal prompt
    /// (builder pattern).
    pub fn with_gate(mut self, gate: ConfirmationGate) -> Self {
        self.gate = gate;
        self
    }

    /// The canonical workspace root.
    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    /// Snapshot of the audit trail, newest last.
    pub fn history(&self) -> Vec<ActionRecord> {
        self.trail.history()
    }

    /// Read a file as UTF-8 text. The path must exist and not be a
    /// directory.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String, FsError> {
        let resolved = self.workspace.resolve(path, true)?;
        if resolved.is_dir() {
            return Err(FsError::IsADirectory { path: resolved });
        }
        let rel = self.workspace.relative(&resolved);

        tracing::debug!("reading file: {}", resolved.display());
        let result = fs::read_to_string(&resolved).map_err(|source| FsError::Io {
            path: resolved,
            source,
        });
        self.record_outcome(ActionType::Read, rel, &result, false);
        result
    }

    /// Write `content` to a file, creating missing parent directories.
    ///
    /// The target need not exist; existing files are overwritten in place.
    /// With `confirm` set, the gate sees a byte count and a preview of the
    /// first 100 characters; a decline writes a failed record with
    /// `user_approved = false` and leaves the filesystem untouched.
    /// Passing `confirm = false` skips the gate entirely — the caller
    /// takes responsibility for already having user consent.
    pub fn write_file(
        &self,
        path: impl AsRef<Path>,
        content: &str,
        confirm: bool,
    ) -> Result<(), FsError> {
        let resolved = self.workspace.resolve(path, false)?;
        let rel = self.workspace.relative(&resolved);

        let approved = if confirm {
            let details = format!(
                "Writing {} bytes to {}\nPreview: {}",
                content.len(),
                rel,
                preview(content)
            );
            self.gate_check("Write File", &details, &rel)?
        } else {
            false
        };

        tracing::debug!("writing file: {}", resolved.display());
        let result = write_with_parents(&resolved, content);
        self.record_outcome(ActionType::Write, rel, &result, approved);
        result
    }

    /// List the immediate children of a directory (non-recursive), in OS
    /// iteration order.
    pub fn list_directory(&self, path: impl AsRef<Path>) -> Result<Vec<FileInfo>, FsError> {
        let resolved = self.workspace.resolve(path, true)?;
        if !resolved.is_dir() {
            return Err(FsError::NotADirectory { path: resolved });
        }
        let rel = self.workspace.relative(&resolved);

        tracing::debug!("listing directory: {}", resolved.display());
        let result = self.read_entries(&resolved);
        self.record_outcome(ActionType::Read, rel, &result, false);
        result
    }

    /// Create a directory and any missing ancestors. Idempotent: succeeds
    /// if the directory already exists.
    pub fn create_directory(&self, path: impl AsRef<Path>, confirm: bool) -> Result<(), FsError> {
        let resolved = self.workspace.resolve(path, false)?;
        let rel = self.workspace.relative(&resolved);

        let approved = if confirm {
            let details = format!("Creating directory: {}", rel);
            self.gate_check("Create Directory", &details, &rel)?
        } else {
            false
        };

        tracing::debug!("creating directory: {}", resolved.display());
        let result = fs::create_dir_all(&resolved).map_err(|source| FsError::Io {
            path: resolved,
            source,
        });
        self.record_outcome(ActionType::Write, rel, &result, approved);
        result
    }

    /// Delete a file. Directories are refused with `IsADirectory`;
    /// recursive delete is deliberately not offered.
    pub fn delete_file(&self, path: impl AsRef<Path>, confirm: bool) -> Result<(), FsError> {
        let resolved = self.workspace.resolve(path, true)?;
        if resolved.is_dir() {
            return Err(FsError::IsADirectory { path: resolved });
        }
        let rel = self.workspace.relative(&resolved);

        let approved = if confirm {
            let details = format!("Deleting file: {}", rel);
            self.gate_check("Delete File", &details, &rel)?
        } else {
            false
        };

        tracing::debug!("deleting file: {}", resolved.display());
        let result = fs::remove_file(&resolved).map_err(|source| FsError::Io {
            path: resolved,
            source,
        });
        self.record_outcome(ActionType::Write, rel, &result, approved);
        result
    }

    /// Move a file. The source must exist and not be a directory; missing
    /// destination parents are created.
    ///
    /// Uses an atomic rename when the OS supports it, falling back to
    /// copy-then-delete across filesystems — the destination holds the full
    /// content before the source is removed.
    pub fn move_file(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        confirm: bool,
    ) -> Result<(), FsError> {
        let src = self.workspace.resolve(source, true)?;
        if src.is_dir() {
            return Err(FsError::IsADirectory { path: src });
        }
        let dest = self.workspace.resolve(destination, false)?;
        let target = format!(
            "{} -> {}",
            self.workspace.relative(&src),
            self.workspace.relative(&dest)
        );

        let approved = if confirm {
            let details = format!("Moving file: {}", target);
            self.gate_check("Move File", &details, &target)?
        } else {
            false
        };

        tracing::debug!("moving file: {} -> {}", src.display(), dest.display());
        let result = move_entry(&src, &dest);
        self.record_outcome(ActionType::Write, target, &result, approved);
        result
    }

    /// Copy a file, preserving the source. Content is copied along with
    /// best-effort metadata (permissions, where the platform supports it).
    pub fn copy_file(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        confirm: bool,
    ) -> Result<(), FsError> {
        let src = self.workspace.resolve(source, true)?;
        if src.is_dir() {
            return Err(FsError::IsADirectory { path: src });
        }
        let dest = self.workspace.resolve(destination, false)?;
        let target = format!(
            "{} -> {}",
            self.workspace.relative(&src),
            self.workspace.relative(&dest)
        );

        let approved = if confirm {
            let details = format!("Copying file: {}", target);
            self.gate_check("Copy File", &details, &target)?
        } else {
            false
        };

        tracing::debug!("copying file: {} -> {}", src.display(), dest.display());
        let result = copy_entry(&src, &dest);
        self.record_outcome(ActionType::Write, target, &result, approved);
        result
    }

    /// Whether `path` is an existing file inside the workspace.
    ///
    /// Exists for defensive probing of unknown paths: containment and I/O
    /// failures degrade to `false`, never an error.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.workspace
            .resolve(path, false)
            .map(|resolved| resolved.is_file())
            .unwrap_or(false)
    }

    /// Whether `path` is an existing directory inside the workspace.
    /// Degrades to `false` like [`file_exists`](Self::file_exists).
    pub fn directory_exists(&self, path: impl AsRef<Path>) -> bool {
        self.workspace
            .resolve(path, false)
            .map(|resolved| resolved.is_dir())
            .unwrap_or(false)
    }

    /// [`FileInfo`] for `path`, or `None` for missing or out-of-workspace
    /// paths. Never raises.
    pub fn file_info(&self, path: impl AsRef<Path>) -> Option<FileInfo> {
        let resolved = self.workspace.resolve(path, true).ok()?;
        let rel = self.workspace.relative(&resolved);
        FileInfo::from_path(&resolved, rel).ok()
    }

    /// Run the confirmation gate for one mutation. On decline, writes the
    /// failed record itself and returns `Cancelled`; on approval returns
    /// `true` for the record's `user_approved` field.
    fn gate_check(&self, operation: &str, details: &str, target: &str) -> Result<bool, FsError> {
        if self.gate.confirm(operation, details) {
            Ok(true)
        } else {
            self.trail.record(
                ActionRecord::failure(ActionType::Write, target, "operation cancelled by user")
                    .with_approval(false),
            );
            Err(FsError::Cancelled {
                operation: operation.to_string(),
            })
        }
    }

    /// Write the single record for a completed operation.
    fn record_outcome<T>(
        &self,
        action: ActionType,
        target: String,
        result: &Result<T, FsError>,
        user_approved: bool,
    ) {
        let record = match result {
            Ok(_) => ActionRecord::success(action, target),
            Err(err) => {
                tracing::warn!("operation failed: {}", err);
                ActionRecord::failure(action, target, err.to_string())
            }
        };
        self.trail.record(record.with_approval(user_approved));
    }

    fn read_entries(&self, dir: &Path) -> Result<Vec<FileInfo>, FsError> {
        let mut entries = Vec::new();
        let iter = fs::read_dir(dir).map_err(|source| FsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in iter {
            let entry = entry.map_err(|source| FsError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let child = entry.path();
            let rel = self.workspace.relative(&child);
            let info = FileInfo::from_path(&child, rel).map_err(|source| FsError::Io {
                path: child,
                source,
            })?;
            entries.push(info);
        }
        Ok(entries)
    }
}

/// First `PREVIEW_CHARS` characters of the content, marked when truncated.
/// Counts characters, not bytes, so multi-byte text never splits.
fn preview(content: &str) -> String {
    let mut head: String = content.chars().take(PREVIEW_CHARS).collect();
    if head.len() < content.len() {
        head.push_str("...");
    }
    head
}

fn write_with_parents(path: &Path, content: &str) -> Result<(), FsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| FsError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| FsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn move_entry(src: &Path, dest: &Path) -> Result<(), FsError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| FsError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    // rename is atomic on the same filesystem; cross-device moves fall back
    // to copy-then-delete, removing the source only once the copy landed.
    if fs::rename(src, dest).is_ok() {
        return Ok(());
    }
    fs::copy(src, dest).map_err(|source| FsError::Io {
        path: dest.to_path_buf(),
        source,
    })?;
    fs::remove_file(src).map_err(|source| FsError::Io {
        path: src.to_path_buf(),
        source,
    })
}

fn copy_entry(src: &Path, dest: &Path) -> Result<(), FsError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| FsError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::copy(src, dest).map_err(|source| FsError::Io {
        path: dest.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    /// Helper: auto-confirming client over a fresh temp workspace.
    fn setup() -> (FsClient, TempDir) {
        let dir = tempdir().unwrap();
        let client = FsClient::new(FsConfig::new(dir.path()).auto_confirm(true)).unwrap();
        (client, dir)
    }

    #[test]
    fn write_then_read_round_trips() {
        let (client, _dir) = setup();

        client.write_file("notes.txt", "hello, sandbox", true).unwrap();
        assert_eq!(client.read_file("notes.txt").unwrap(), "hello, sandbox");
    }

    #[test]
    fn write_creates_missing_parents() {
        let (client, dir) = setup();

        client.write_file("a/b.txt", "hi", true).unwrap();

        assert!(dir.path().join("a").is_dir());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a/b.txt")).unwrap(),
            "hi"
        );

        // list(".") shows exactly one entry: the new directory.
        let entries = client.list_directory(".").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a");
        assert!(entries[0].is_directory);
        assert_eq!(entries[0].size, None);
    }

    #[test]
    fn read_outside_workspace_is_a_security_error() {
        let (client, _dir) = setup();

        let result = client.read_file("/etc/passwd");
        assert!(matches!(result, Err(FsError::OutsideWorkspace { .. })));

        let result = client.read_file("../../etc/passwd");
        assert!(matches!(result, Err(FsError::OutsideWorkspace { .. })));
    }

    #[test]
    fn every_mutation_rejects_escaping_paths() {
        let (client, _dir) = setup();
        let escape = "../outside.txt";

        assert!(client.write_file(escape, "x", true).unwrap_err().is_security());
        assert!(client.create_directory(escape, true).unwrap_err().is_security());
        assert!(client.delete_file(escape, true).unwrap_err().is_security());
        assert!(client.move_file(escape, "in.txt", true).unwrap_err().is_security());
        assert!(client.copy_file(escape, "in.txt", true).unwrap_err().is_security());
    }

    #[test]
    fn probes_degrade_instead_of_raising() {
        let (client, _dir) = setup();

        assert!(!client.file_exists("../../etc/passwd"));
        assert!(!client.directory_exists("../../etc"));
        assert!(client.file_info("../../etc/passwd").is_none());
        assert!(client.file_info("missing.txt").is_none());
    }

    #[test]
    fn read_refuses_directories() {
        let (client, _dir) = setup();
        client.create_directory("sub", true).unwrap();

        let result = client.read_file("sub");
        assert!(matches!(result, Err(FsError::IsADirectory { .. })));
    }

    #[test]
    fn list_refuses_files() {
        let (client, _dir) = setup();
        client.write_file("plain.txt", "x", true).unwrap();

        let result = client.list_directory("plain.txt");
        assert!(matches!(result, Err(FsError::NotADirectory { .. })));
    }

    #[test]
    fn mkdir_is_idempotent() {
        let (client, dir) = setup();

        client.create_directory("twice", true).unwrap();
        client.create_directory("twice", true).unwrap();

        assert!(dir.path().join("twice").is_dir());
        assert_eq!(client.list_directory(".").unwrap().len(), 1);
    }

    #[test]
    fn delete_refuses_directories() {
        let (client, _dir) = setup();
        client.create_directory("keep", true).unwrap();

        let result = client.delete_file("keep", true);
        assert!(matches!(result, Err(FsError::IsADirectory { .. })));
        assert!(client.directory_exists("keep"));
    }

    #[test]
    fn delete_removes_files() {
        let (client, _dir) = setup();
        client.write_file("gone.txt", "x", true).unwrap();

        client.delete_file("gone.txt", true).unwrap();
        assert!(!client.file_exists("gone.txt"));
    }

    #[test]
    fn move_removes_source_and_preserves_content() {
        let (client, _dir) = setup();
        client.write_file("src.txt", "payload", true).unwrap();

        client.move_file("src.txt", "sub/dest.txt", true).unwrap();

        assert!(!client.file_exists("src.txt"));
        assert_eq!(client.read_file("sub/dest.txt").unwrap(), "payload");
    }

    #[test]
    fn copy_preserves_source() {
        let (client, _dir) = setup();
        client.write_file("src.txt", "payload", true).unwrap();

        client.copy_file("src.txt", "dup.txt", true).unwrap();

        assert_eq!(client.read_file("src.txt").unwrap(), "payload");
        assert_eq!(client.read_file("dup.txt").unwrap(), "payload");
    }

    #[test]
    fn declined_gate_cancels_all_mutations_without_side_effects() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("existing.txt"), "original").unwrap();

        let client = FsClient::new(FsConfig::new(dir.path()))
            .unwrap()
            .with_gate(ConfirmationGate::interactive(|_, _| false));

        assert!(matches!(
            client.write_file("new.txt", "x", true),
            Err(FsError::Cancelled { .. })
        ));
        assert!(matches!(
            client.create_directory("newdir", true),
            Err(FsError::Cancelled { .. })
        ));
        assert!(matches!(
            client.delete_file("existing.txt", true),
            Err(FsError::Cancelled { .. })
        ));
        assert!(matches!(
            client.move_file("existing.txt", "moved.txt", true),
            Err(FsError::Cancelled { .. })
        ));
        assert!(matches!(
            client.copy_file("existing.txt", "copy.txt", true),
            Err(FsError::Cancelled { .. })
        ));

        // Zero filesystem side effects.
        assert!(!client.file_exists("new.txt"));
        assert!(!client.directory_exists("newdir"));
        assert!(!client.file_exists("moved.txt"));
        assert!(!client.file_exists("copy.txt"));
        assert_eq!(client.read_file("existing.txt").unwrap(), "original");

        // Each cancellation left a failed record with user_approved = false.
        let cancelled: Vec<_> = client
            .history()
            .into_iter()
            .filter(|record| !record.success && record.action == ActionType::Write)
            .collect();
        assert_eq!(cancelled.len(), 5);
        assert!(cancelled.iter().all(|record| !record.user_approved));
        assert!(cancelled
            .iter()
            .all(|record| record.error_message.as_deref() == Some("operation cancelled by user")));
    }

    #[test]
    fn gate_bypass_skips_confirmation() {
        let dir = tempdir().unwrap();
        // Deny-all gate, but confirm = false never consults it.
        let client = FsClient::new(FsConfig::new(dir.path())).unwrap();

        client.write_file("unchecked.txt", "x", false).unwrap();
        assert!(client.file_exists("unchecked.txt"));

        let history = client.history();
        let record = history.last().unwrap();
        assert!(record.success);
        assert!(!record.user_approved);
    }

    #[test]
    fn approved_mutations_record_user_approval() {
        let (client, _dir) = setup();
        client.write_file("ok.txt", "x", true).unwrap();

        let history = client.history();
        let record = history.last().unwrap();
        assert!(record.success);
        assert!(record.user_approved);
        assert_eq!(record.target, "ok.txt");
    }

    #[test]
    fn failed_operations_still_produce_records() {
        let (client, dir) = setup();
        // A directory where write_file expects to place a file.
        std::fs::create_dir(dir.path().join("blocked.txt")).unwrap();

        let result = client.write_file("blocked.txt", "x", true);
        assert!(matches!(result, Err(FsError::Io { .. })));

        let history = client.history();
        let record = history.last().unwrap();
        assert!(!record.success);
        assert!(record.error_message.is_some());
    }

    #[test]
    fn history_respects_capacity() {
        let dir = tempdir().unwrap();
        let client = FsClient::new(
            FsConfig::new(dir.path())
                .auto_confirm(true)
                .history_size(3),
        )
        .unwrap();

        for i in 0..5 {
            client
                .write_file(format!("file-{}.txt", i), "x", true)
                .unwrap();
        }

        let history = client.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].target, "file-2.txt");
        assert_eq!(history[2].target, "file-4.txt");
    }

    #[test]
    fn reads_are_audited_too() {
        let (client, _dir) = setup();
        client.write_file("read-me.txt", "x", true).unwrap();
        client.read_file("read-me.txt").unwrap();

        let history = client.history();
        assert_eq!(history.last().unwrap().action, ActionType::Read);
    }

    #[test]
    fn file_info_reports_size_and_type() {
        let (client, _dir) = setup();
        client.write_file("sized.txt", "12345", true).unwrap();
        client.create_directory("sub", true).unwrap();

        let info = client.file_info("sized.txt").unwrap();
        assert_eq!(info.name, "sized.txt");
        assert!(!info.is_directory);
        assert_eq!(info.size, Some(5));
        assert!(info.modified.is_some());

        let info = client.file_info("sub").unwrap();
        assert!(info.is_directory);
        assert_eq!(info.size, None);
    }

    #[test]
    fn preview_truncates_long_content_on_char_boundaries() {
        let long = "é".repeat(150);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);

        assert_eq!(preview("short"), "short");
    }
}
