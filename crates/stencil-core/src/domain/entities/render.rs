//! Flat parameter substitution.
//!
//! Blueprint content is static and known at authoring time, so rendering is
//! deliberately not a templating language: no conditionals, no loops, no
//! nested templates. A template is text with `{{KEY}}` placeholders and a
//! [`RenderParams`] map supplies plain string values for them.
//!
//! ## Placeholder grammar
//!
//! ```text
//! placeholder := "{{" key "}}"
//! key         := [A-Za-z0-9_.-]+
//! ```
//!
//! Anything else between braces (`{{ put("a", 1); }}` in a Java initializer,
//! say) is plain text and passes through untouched.
//!
//! ## Unknown keys
//!
//! A placeholder with no matching parameter is left as-is by [`RenderParams::render`].
//! It is a defect in the blueprint, not a runtime condition: use
//! [`RenderParams::unresolved`] (or `DomainValidator::validate_placeholders`)
//! to catch it while authoring.

use std::collections::BTreeMap;
use std::fmt;

/// Where template text comes from.
///
/// Built-in blueprints reference compile-time strings; manifests loaded from
/// disk own their content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s.as_str(),
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

/// File content: copied verbatim or run through parameter substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    /// Copied byte-for-byte; placeholders are not expanded.
    Literal(TemplateSource),
    /// `{{KEY}}` placeholders are substituted.
    Parameterized(TemplateSource),
}

impl TemplateContent {
    pub fn literal(source: impl Into<TemplateSource>) -> Self {
        Self::Literal(source.into())
    }

    pub fn parameterized(source: impl Into<TemplateSource>) -> Self {
        Self::Parameterized(source.into())
    }

    /// Raw template text.
    pub fn source(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Parameterized(s) => s.as_str(),
        }
    }

    /// Produce final content for these parameters.
    pub fn render(&self, params: &RenderParams) -> String {
        match self {
            Self::Literal(s) => s.as_str().to_string(),
            Self::Parameterized(s) => params.render(s.as_str()),
        }
    }

    /// Placeholders this content would leave unexpanded.
    pub fn unresolved(&self, params: &RenderParams) -> Vec<String> {
        match self {
            Self::Literal(_) => Vec::new(),
            Self::Parameterized(s) => params.unresolved(s.as_str()),
        }
    }
}

/// Named string parameters for substitution.
///
/// Backed by a `BTreeMap` so iteration (and therefore debug output and
/// manifest rendering) is ordered and reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderParams {
    values: BTreeMap<String, String>,
}

impl RenderParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter, returning the updated set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Merge `other` into `self`; `other` wins on conflicts.
    pub fn merged(mut self, other: &RenderParams) -> Self {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace every known `{{KEY}}` in one left-to-right pass.
    ///
    /// Substituted values are never rescanned, so a value containing
    /// `{{OTHER}}` is emitted literally.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        for segment in segments(template) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Key(key) => match self.values.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                },
            }
        }
        out
    }

    /// Placeholder keys in `template` that have no value here, in order of
    /// first appearance.
    pub fn unresolved(&self, template: &str) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for segment in segments(template) {
            if let Segment::Key(key) = segment {
                if !self.values.contains_key(key) && !missing.iter().any(|m| m == key) {
                    missing.push(key.to_string());
                }
            }
        }
        missing
    }
}

impl fmt::Display for RenderParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        write!(f, "[{}]", keys.join(", "))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Key(&'a str),
}

fn is_key(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Split a template into text runs and placeholder keys.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            out.push(Segment::Text(&rest[..start]));
        }
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) if is_key(&after[..end]) => {
                out.push(Segment::Key(&after[..end]));
                rest = &after[end + 2..];
            }
            _ => {
                // Not a placeholder: emit one brace and rescan from the next,
                // so `{{{KEY}}}` still finds the inner placeholder.
                out.push(Segment::Text(&rest[start..start + 1]));
                rest = &rest[start + 1..];
            }
        }
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

// ============================================================================
// Case conversion
// ============================================================================

/// Convert a name to PascalCase.
///
/// | Input | Output |
/// |-------|--------|
/// | "api-gateway" | "ApiGateway" |
/// | "crypto_vault" | "CryptoVault" |
/// | "ml inference" | "MlInference" |
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RenderParams {
        RenderParams::new()
            .with("PROJECT_NAME", "api-gateway")
            .with("JAVA_VERSION", "17")
    }

    #[test]
    fn substitutes_known_keys() {
        let out = params().render("name={{PROJECT_NAME}} java={{JAVA_VERSION}}");
        assert_eq!(out, "name=api-gateway java=17");
    }

    #[test]
    fn repeated_placeholders_all_replaced() {
        let out = params().render("{{PROJECT_NAME}}{{PROJECT_NAME}}");
        assert_eq!(out, "api-gatewayapi-gateway");
    }

    #[test]
    fn unknown_keys_left_in_place() {
        let out = params().render("x={{MISSING}}");
        assert_eq!(out, "x={{MISSING}}");
        assert_eq!(params().unresolved("{{MISSING}} {{MISSING}} {{OTHER}}"), vec![
            "MISSING".to_string(),
            "OTHER".to_string()
        ]);
    }

    #[test]
    fn values_are_not_rescanned() {
        let p = RenderParams::new()
            .with("A", "{{B}}")
            .with("B", "boom");
        assert_eq!(p.render("{{A}}"), "{{B}}");
    }

    #[test]
    fn java_double_brace_initializer_is_plain_text() {
        let src = "new HashMap<>() {{ put(\"k\", 1); }}";
        assert_eq!(params().render(src), src);
        assert!(params().unresolved(src).is_empty());
    }

    #[test]
    fn triple_braces_keep_outer_pair() {
        assert_eq!(params().render("{{{JAVA_VERSION}}}"), "{17}");
    }

    #[test]
    fn literal_content_is_not_expanded() {
        let content = TemplateContent::literal("{{PROJECT_NAME}}");
        assert_eq!(content.render(&params()), "{{PROJECT_NAME}}");
        assert!(content.unresolved(&RenderParams::new()).is_empty());
    }

    #[test]
    fn rendering_is_deterministic() {
        let template = "{{JAVA_VERSION}}-{{PROJECT_NAME}}-{{JAVA_VERSION}}";
        assert_eq!(params().render(template), params().render(template));
    }

    #[test]
    fn merged_prefers_other() {
        let merged = params().merged(&RenderParams::new().with("JAVA_VERSION", "21"));
        assert_eq!(merged.get("JAVA_VERSION"), Some("21"));
        assert_eq!(merged.get("PROJECT_NAME"), Some("api-gateway"));
    }

    #[test]
    fn pascal_case() {
        assert_eq!(to_pascal_case("api-gateway"), "ApiGateway");
        assert_eq!(to_pascal_case("crypto_vault"), "CryptoVault");
        assert_eq!(to_pascal_case("ml inference service"), "MlInferenceService");
    }
}
