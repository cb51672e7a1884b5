//! Temporary working tree for one run.
//!
//! A [`Workspace`] is created fresh at session start and removed when it is
//! dropped, so early returns and errors clean up too. Per-container
//! directories live under `containers/` and are never removed mid-run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Directory name used under the system temp dir.
pub const DEFAULT_DIR_NAME: &str = "iconsextract";

/// File the enumerator writes its table to.
const DUMP_FILE_NAME: &str = "list.txt";

/// Subdirectory holding one directory per extracted container.
const CONTAINERS_DIR_NAME: &str = "containers";

/// The temporary working tree of a run.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Default root: `<system temp>/iconsextract`.
    pub fn default_root() -> PathBuf {
        std::env::temp_dir().join(DEFAULT_DIR_NAME)
    }

    /// Creates an empty workspace at `root`, deleting anything already there.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if root.exists() {
            debug!(root = %root.display(), "Removing stale workspace");
            fs::remove_dir_all(&root)?;
        }
        fs::create_dir_all(root.join(CONTAINERS_DIR_NAME))?;
        Ok(Self { root })
    }

    /// Root directory of the workspace.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the registry dump is written.
    pub fn dump_path(&self) -> PathBuf {
        self.root.join(DUMP_FILE_NAME)
    }

    /// Directory for the container identified by `key`.
    pub fn container_dir(&self, key: &str) -> PathBuf {
        self.root.join(CONTAINERS_DIR_NAME).join(key)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => debug!(root = %self.root.display(), "Removed workspace"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(root = %self.root.display(), error = %e, "Failed to remove workspace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_clears_stale_state() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("ws");
        fs::create_dir_all(root.join("old")).unwrap();
        fs::write(root.join("old/stale.ico"), b"x").unwrap();

        let workspace = Workspace::create(&root).unwrap();
        assert!(!root.join("old").exists());
        assert!(workspace.container_dir("a.dll").parent().unwrap().is_dir());
        assert_eq!(workspace.dump_path(), root.join("list.txt"));
    }

    #[test]
    fn test_drop_removes_root() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("ws");
        {
            let workspace = Workspace::create(&root).unwrap();
            fs::create_dir(workspace.container_dir("shell32.dll")).unwrap();
            fs::write(workspace.dump_path(), b"dump").unwrap();
        }
        assert!(!root.exists());
    }

    #[test]
    fn test_drop_tolerates_missing_root() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("ws");
        let workspace = Workspace::create(&root).unwrap();
        fs::remove_dir_all(&root).unwrap();
        drop(workspace);
        assert!(!root.exists());
    }

    #[test]
    fn test_default_root_is_under_temp() {
        assert_eq!(
            Workspace::default_root(),
            std::env::temp_dir().join("iconsextract")
        );
    }
}
