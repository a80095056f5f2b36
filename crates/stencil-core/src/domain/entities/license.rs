use std::borrow::Cow;

/// Header stamped on generated Java sources unless configured otherwise.
pub const DEFAULT_LICENSE_HEADER: &str = "\
/*
 * Copyright (c) Stencil generated workspace.
 *
 * Licensed under the Apache License, Version 2.0 (the \"License\");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an \"AS IS\" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 */
";

/// Fixed text block placed at the top of flagged files.
///
/// The header is immutable and never passes through the renderer. It is
/// written exactly once per file, before the rendered body, separated by a
/// blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseHeader(Cow<'static, str>);

impl LicenseHeader {
    /// Custom header text. A trailing newline is added when missing.
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Self(Cow::Owned(text))
    }

    pub const fn apache2() -> Self {
        Self(Cow::Borrowed(DEFAULT_LICENSE_HEADER))
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// Prepend the header to `body`.
    ///
    /// Callers must check [`Self::occurrences`] on the body first; applying to
    /// a body that already carries the header would duplicate it.
    pub fn apply(&self, body: &str) -> String {
        let mut out = String::with_capacity(self.0.len() + body.len() + 1);
        out.push_str(&self.0);
        out.push('\n');
        out.push_str(body);
        out
    }

    /// Number of times the header block appears in `content`.
    pub fn occurrences(&self, content: &str) -> usize {
        let needle = self.0.trim_end();
        if needle.is_empty() {
            return 0;
        }
        content.matches(needle).count()
    }
}

impl Default for LicenseHeader {
    fn default() -> Self {
        Self::apache2()
    }
}
