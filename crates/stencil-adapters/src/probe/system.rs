//! Tool probe backed by the host `PATH` and `std::process::Command`.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use stencil_core::application::ports::ToolProbe;
use tracing::debug;

/// Finds executables on `PATH` and runs them to read their version.
#[derive(Debug, Clone, Default)]
pub struct SystemToolProbe {
    search_path: Option<OsString>,
}

impl SystemToolProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `path` (a `PATH`-style list) instead of the process `PATH`.
    pub fn with_search_path(path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(path.into()),
        }
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        let raw = match &self.search_path {
            Some(path) => Some(path.clone()),
            None => env::var_os("PATH"),
        };
        raw.map(|p| env::split_paths(&p).collect())
            .unwrap_or_default()
    }
}

impl ToolProbe for SystemToolProbe {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        let as_path = Path::new(tool);
        if as_path.components().count() > 1 {
            return is_executable(as_path).then(|| as_path.to_path_buf());
        }

        let found = self
            .search_dirs()
            .into_iter()
            .flat_map(|dir| candidates(&dir, tool))
            .find(|candidate| is_executable(candidate));
        debug!(tool, found = ?found, "PATH lookup");
        found
    }

    fn version(&self, tool: &str, args: &[String]) -> Result<String, String> {
        let program = self.locate(tool).unwrap_or_else(|| PathBuf::from(tool));
        debug!(program = %program.display(), ?args, "Running version probe");

        let output = Command::new(&program)
            .args(args)
            .output()
            .map_err(|e| format!("failed to execute: {e}"))?;

        // `java -version` prints to stderr; Maven prints to stdout.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }

        debug!(
            status = %output.status,
            output = %text.trim(),
            "Version probe finished"
        );

        if !output.status.success() {
            let first_line = text.lines().next().unwrap_or("").trim();
            return Err(if first_line.is_empty() {
                format!("exited with {}", output.status)
            } else {
                format!("exited with {}: {}", output.status, first_line)
            });
        }

        Ok(text)
    }
}

fn candidates(dir: &Path, tool: &str) -> Vec<PathBuf> {
    let mut out = vec![dir.join(tool)];
    if cfg!(windows) {
        let exts = env::var("PATHEXT").unwrap_or_else(|_| ".EXE;.CMD;.BAT".into());
        out.extend(
            exts.split(';')
                .filter(|e| !e.is_empty())
                .map(|ext| dir.join(format!("{tool}{}", ext.to_ascii_lowercase()))),
        );
    }
    out
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
