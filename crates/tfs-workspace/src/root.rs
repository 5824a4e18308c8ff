// root.rs — WorkspaceRoot: the containment boundary for all operations.
//
// Resolution happens in three steps:
//   1. Join relative candidates with the root; collapse `.` and `..`
//      lexically.
//   2. Canonicalize the deepest existing ancestor (resolving symlinks) and
//      re-append the non-existent tail, so write targets for files that
//      don't exist yet still validate.
//   3. Check containment component-wise against the canonical root.
//
// The containment check uses `Path::starts_with`, which compares path
// segments — never a raw string prefix. A root of `/a/ws` must reject
// `/a/ws-evil/x`, which a string prefix check would happily accept.

use std::path::{Component, Path, PathBuf};

use crate::error::WorkspaceError;

/// The canonical directory within which all operations are confined.
///
/// Immutable for the lifetime of a client. Construction canonicalizes the
/// root so that symlinked roots compare correctly against resolved
/// candidates.
#[derive(Debug, Clone)]
pub struct WorkspaceRoot {
    root: PathBuf,
}

impl WorkspaceRoot {
    /// Canonicalize `root` and wrap it. The directory must already exist;
    /// creating it is the caller's setup concern.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|source| WorkspaceError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The canonical workspace root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve an untrusted candidate path to a canonical path inside the
    /// workspace.
    ///
    /// With `must_exist` set, a path that passes containment but is absent
    /// fails with [`WorkspaceError::NotFound`]. Containment failures always
    /// fail with [`WorkspaceError::OutsideWorkspace`] and no OS call is made
    /// on the target.
    ///
    /// Known limitation: the non-existent tail of a write target is checked
    /// lexically, so a symlink created between validation and the actual
    /// operation is not caught (TOCTOU). A resolved path must not be treated
    /// as valid across operations.
    pub fn resolve(
        &self,
        candidate: impl AsRef<Path>,
        must_exist: bool,
    ) -> Result<PathBuf, WorkspaceError> {
        let candidate = candidate.as_ref();
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };

        let resolved = canonicalize_existing_prefix(&normalize_lexically(&joined))?;

        if !resolved.starts_with(&self.root) {
            tracing::warn!(
                "rejected path outside workspace: {}",
                candidate.display()
            );
            return Err(WorkspaceError::OutsideWorkspace {
                path: candidate.display().to_string(),
                root: self.root.clone(),
            });
        }

        if must_exist && !resolved.exists() {
            return Err(WorkspaceError::NotFound { path: resolved });
        }

        Ok(resolved)
    }

    /// Workspace-relative display form of a resolved path; `.` for the root
    /// itself.
    pub fn relative(&self, resolved: &Path) -> String {
        match resolved.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => rel.display().to_string(),
            Err(_) => resolved.display().to_string(),
        }
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// Popping past the filesystem root is a no-op; the result then fails the
/// containment check rather than panicking here.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Canonicalize the deepest existing ancestor of `path` (resolving
/// symlinks), then re-append the components that don't exist yet.
fn canonicalize_existing_prefix(path: &Path) -> Result<PathBuf, WorkspaceError> {
    let mut existing = path;
    let mut tail = Vec::new();

    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing
        .canonicalize()
        .map_err(|source| WorkspaceError::Io {
            path: existing.to_path_buf(),
            source,
        })?;

    for name in tail.iter().rev() {
        resolved.push(name);
    }

    Ok(resolved)
}
