//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StencilError, StencilResult},
};
use tracing::{trace, warn};

/// Suffix of the sibling file a write goes to before it is renamed into place.
pub const TEMP_SUFFIX: &str = ".stencil-tmp";

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    /// Temp sibling, fsync, rename, fsync of the parent directory.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
        let tmp_path = temp_path(path)?;
        trace!(tmp = %tmp_path.display(), "Writing temp file");

        if let Err(e) = write_and_rename(&tmp_path, path, content) {
            if tmp_path.exists() {
                if let Err(cleanup) = fs::remove_file(&tmp_path) {
                    warn!(
                        path = %tmp_path.display(),
                        error = %cleanup,
                        "Failed to remove temp file"
                    );
                }
            }
            return Err(map_io_error(path, e, "write file"));
        }

        Ok(())
    }
}

/// `dir/.name.stencil-tmp` for `dir/name`.
pub fn temp_path(path: &Path) -> StencilResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        StencilError::from(ApplicationError::FilesystemWriteFailure {
            path: path.to_path_buf(),
            reason: "path has no file name".into(),
        })
    })?;
    let tmp_name = format!(".{}{}", file_name.to_string_lossy(), TEMP_SUFFIX);
    Ok(path.with_file_name(tmp_name))
}

fn write_and_rename(tmp_path: &Path, path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(content)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            sync_dir(parent)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    ApplicationError::FilesystemWriteFailure {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
