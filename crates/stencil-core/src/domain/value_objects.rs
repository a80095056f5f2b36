//! Small immutable values shared across the domain.

use std::fmt;

use serde::Serialize;

use crate::domain::environment::EnvironmentWarning;

// ============================================================================
// Platform
// ============================================================================

/// Host operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os_id(std::env::consts::OS)
    }

    /// Map an OS identifier (`std::env::consts::OS`, `uname -s`) to a platform.
    pub fn from_os_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "linux" => Self::Linux,
            "macos" | "darwin" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TextTool
// ============================================================================

/// The stream-editing tool generated helper scripts should call.
///
/// BSD `sed` on macOS has incompatible in-place semantics, so GNU `sed`
/// (installed as `gsed`) is preferred there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTool {
    Sed,
    GnuSed,
}

impl TextTool {
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Sed => "sed",
            Self::GnuSed => "gsed",
        }
    }

    /// Pick exactly one variant for `platform`.
    ///
    /// On macOS `gsed` wins when `is_available` finds it; otherwise `sed` is
    /// used and a fallback warning is returned. Every other platform gets
    /// `sed` without a warning.
    pub fn resolve(
        platform: Platform,
        is_available: impl Fn(&str) -> bool,
    ) -> (Self, Option<EnvironmentWarning>) {
        match platform {
            Platform::MacOs if is_available(Self::GnuSed.command()) => (Self::GnuSed, None),
            Platform::MacOs => (
                Self::Sed,
                Some(EnvironmentWarning::TextToolFallback {
                    platform,
                    preferred: Self::GnuSed.command().into(),
                    fallback: Self::Sed.command().into(),
                }),
            ),
            _ => (Self::Sed, None),
        }
    }
}

impl fmt::Display for TextTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}
