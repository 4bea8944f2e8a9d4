//! The notes root and path construction confined to it.

use std::path::{Component, Path, PathBuf};

use crate::error::NoteError;
use crate::logging::Log;

/// The directory every note lives in.
///
/// The root is absolute and lexically normalized, so containment can be
/// checked component-wise without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDirectory {
    root: PathBuf,
}

impl NoteDirectory {
    /// Create `path` (recursively) if needed and use it as the notes root.
    ///
    /// A creation failure is logged and otherwise ignored; operations on
    /// notes will then fail individually.
    pub fn ensure(path: &Path, log: &dyn Log) -> Self {
        if let Err(e) = std::fs::create_dir_all(path) {
            log.error(&format!(
                "could not create notes directory {}: {e}",
                path.display()
            ));
            return Self::at(path);
        }
        dunce::canonicalize(path).map_or_else(|_| Self::at(path), |root| Self::at(&root))
    }

    /// Use `path` as the notes root without touching the filesystem.
    #[must_use]
    pub fn at(path: &Path) -> Self {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Self {
            root: normalize(&absolute),
        }
    }

    /// The absolute notes root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `filename` inside the notes root.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::OutsideNotesDirectory`] if the resolved path is
    /// not the root or a descendant of it, e.g. for `../../etc/passwd` or an
    /// absolute path elsewhere.
    pub fn safe_path(&self, filename: &str) -> Result<PathBuf, NoteError> {
        let target = normalize(&self.root.join(filename));
        if target.starts_with(&self.root) {
            Ok(target)
        } else {
            Err(NoteError::OutsideNotesDirectory {
                name: filename.to_string(),
                root: self.root.clone(),
            })
        }
    }
}

/// Resolve `.` and `..` lexically. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component);
            }
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::BufferedLog;

    fn notes() -> NoteDirectory {
        #[cfg(windows)]
        let root = Path::new(r"C:\Users\me\notes");
        #[cfg(not(windows))]
        let root = Path::new("/home/me/notes");
        NoteDirectory::at(root)
    }

    #[test]
    fn plain_name_resolves_inside_root() {
        let dir = notes();
        let path = dir.safe_path("2025-01-01.md").unwrap();
        assert_eq!(path, dir.root().join("2025-01-01.md"));
    }

    #[test]
    fn subdirectories_are_allowed() {
        let dir = notes();
        let path = dir.safe_path("work/standup.md").unwrap();
        assert_eq!(path, dir.root().join("work").join("standup.md"));
    }

    #[test]
    fn inner_parent_segments_that_stay_inside_are_allowed() {
        let dir = notes();
        let path = dir.safe_path("work/../ideas.md").unwrap();
        assert_eq!(path, dir.root().join("ideas.md"));
    }

    #[test]
    fn traversal_outside_root_is_rejected() {
        let dir = notes();
        let err = dir.safe_path("../../etc/passwd.md").unwrap_err();
        assert!(matches!(err, NoteError::OutsideNotesDirectory { .. }));
    }

    #[test]
    fn sibling_with_common_prefix_is_rejected() {
        let dir = notes();
        assert!(dir.safe_path("../notes-private/secret.md").is_err());
    }

    #[cfg(not(windows))]
    #[test]
    fn absolute_name_outside_root_is_rejected() {
        let dir = notes();
        assert!(dir.safe_path("/etc/passwd").is_err());
    }

    #[cfg(not(windows))]
    #[test]
    fn absolute_name_inside_root_is_allowed() {
        let dir = notes();
        let path = dir.safe_path("/home/me/notes/todo.md").unwrap();
        assert_eq!(path, PathBuf::from("/home/me/notes/todo.md"));
    }

    #[test]
    fn root_is_normalized() {
        let dir = NoteDirectory::at(&notes().root().join("sub").join(".."));
        assert_eq!(dir.root(), notes().root());
    }

    #[test]
    fn ensure_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("a").join("b");
        let log = BufferedLog::new();
        let dir = NoteDirectory::ensure(&target, &log);
        assert!(target.is_dir(), "directory should be created recursively");
        assert!(dir.root().is_absolute());
        assert!(log.entries().is_empty(), "no errors expected: {:?}", log.entries());
    }

    #[test]
    fn ensure_logs_creation_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("not-a-dir");
        std::fs::write(&file, "").unwrap();
        let log = BufferedLog::new();
        let dir = NoteDirectory::ensure(&file.join("notes"), &log);
        assert!(log.has_error("could not create notes directory"));
        assert!(dir.root().ends_with("notes"));
    }

    #[cfg(not(windows))]
    #[test]
    fn normalize_parent_at_root_stays_at_root() {
        assert_eq!(normalize(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    }
}
