//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StencilError, StencilResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to the orchestrator and
/// inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    fail_under: Vec<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write at or below `path` fail.
    pub fn fail_writes_under(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.fail_under.push(path.into());
        }
    }

    /// Read a file's content as UTF-8 (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Files below `root`, as root-relative slash paths.
    pub fn list_files_under(&self, root: &Path) -> Vec<String> {
        self.list_files()
            .into_iter()
            .filter_map(|p| {
                p.strip_prefix(root)
                    .ok()
                    .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            })
            .collect()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
        }
    }

    fn lock_error(path: &Path) -> StencilError {
        ApplicationError::FilesystemWriteFailure {
            path: path.to_path_buf(),
            reason: "memory filesystem lock poisoned".into(),
        }
        .into()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_error(path))?;

        if inner.files.contains_key(path) {
            return Err(ApplicationError::FilesystemWriteFailure {
                path: path.to_path_buf(),
                reason: "a file exists at this path".into(),
            }
            .into());
        }

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_error(path))?;

        if inner.fail_under.iter().any(|p| path.starts_with(p)) {
            return Err(ApplicationError::FilesystemWriteFailure {
                path: path.to_path_buf(),
                reason: "injected write failure".into(),
            }
            .into());
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemWriteFailure {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_atomic(Path::new("/a/b.txt"), b"x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_atomic(Path::new("/a/b.txt"), b"x").unwrap();
        assert_eq!(fs.read_file(Path::new("/a/b.txt")).as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.create_dir_all(Path::new("/out")).unwrap();
        assert!(other.is_dir(Path::new("/out")));
    }

    #[test]
    fn injected_failure_applies_to_subtree() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/out/b")).unwrap();
        fs.fail_writes_under("/out/b");

        assert!(fs.write_atomic(Path::new("/out/b/x"), b"").is_err());
        fs.create_dir_all(Path::new("/out/a")).unwrap();
        assert!(fs.write_atomic(Path::new("/out/a/x"), b"").is_ok());
    }

    #[test]
    fn list_files_under_is_relative() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/out/app/src")).unwrap();
        fs.write_atomic(Path::new("/out/app/src/A.java"), b"").unwrap();
        fs.write_atomic(Path::new("/out/app/pom.xml"), b"").unwrap();

        assert_eq!(fs.list_files_under(Path::new("/out/app")), vec![
            "pom.xml".to_string(),
            "src/A.java".to_string()
        ]);
    }
}
