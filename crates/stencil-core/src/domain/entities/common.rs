use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to stay inside a project root.
///
/// Invariant: never absolute, never empty, no `..` components. `.`
/// components are dropped at construction, so `./a/` and `a` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        check(&path)?;
        Ok(Self(normalize(&path)?))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        check(segment)?;
        Ok(Self(self.0.join(normalize(segment)?)))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Path rendered with `/` separators regardless of host.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

fn check(path: &Path) -> Result<(), DomainError> {
    if path.is_absolute() || path.has_root() {
        return Err(DomainError::AbsolutePathNotAllowed {
            path: path.display().to_string(),
        });
    }
    if path.as_os_str().is_empty() {
        return Err(DomainError::InvalidBlueprint("empty path".into()));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(DomainError::PathEscapesRoot {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// Drop `.` components. A path made only of them names the root itself.
fn normalize(path: &Path) -> Result<PathBuf, DomainError> {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        return Err(DomainError::InvalidBlueprint(format!(
            "path '{}' resolves to the project root",
            path.display()
        )));
    }
    Ok(normalized)
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_slash_string())
    }
}
