//! Media range parsing and wildcard matching for content negotiation.
//!
//! A media range is a content-type pattern such as `application/json`,
//! `application/*`, or `*/*`. Routes declare the ranges they accept and
//! produce; the route matching predicate uses [`MediaRange::includes`] to
//! decide whether a request's content type is compatible.

use std::fmt;

/// A `type/subtype` media range with `*` wildcards.
///
/// Parsing is deliberately lenient: parameters after `;` are ignored,
/// type and subtype are lower-cased, and a missing subtype is treated as
/// a wildcard. Validating media-type syntax is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRange {
    kind: String,
    subtype: String,
}

impl MediaRange {
    /// Parse a media range from header text, e.g. `application/json; charset=utf-8`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let essence = text.split(';').next().unwrap_or("").trim();
        let (kind, subtype) = match essence.split_once('/') {
            Some((k, s)) => (k.trim(), s.trim()),
            None => (essence, "*"),
        };
        Self {
            kind: normalize(kind),
            subtype: normalize(subtype),
        }
    }

    /// The `*/*` range, compatible with every content type.
    #[must_use]
    pub fn any() -> Self {
        Self::new("*/*")
    }

    /// Primary type, lower-cased (`application` in `application/json`).
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Subtype, lower-cased (`json` in `application/json`).
    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Whether this range is compatible with `other`.
    ///
    /// A `*` on either side of a component makes that component compatible,
    /// so `application/*` includes `application/json` and `*/*` includes
    /// everything.
    #[must_use]
    pub fn includes(&self, other: &MediaRange) -> bool {
        component_matches(&self.kind, &other.kind)
            && component_matches(&self.subtype, &other.subtype)
    }
}

impl From<&str> for MediaRange {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}

fn normalize(component: &str) -> String {
    if component.is_empty() {
        "*".to_string()
    } else {
        component.to_ascii_lowercase()
    }
}

fn component_matches(a: &str, b: &str) -> bool {
    a == "*" || b == "*" || a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_and_subtype() {
        let range = MediaRange::new("Application/JSON");
        assert_eq!(range.kind(), "application");
        assert_eq!(range.subtype(), "json");
    }

    #[test]
    fn ignores_parameters() {
        let range = MediaRange::new("text/html; charset=utf-8");
        assert_eq!(range.to_string(), "text/html");
    }

    #[test]
    fn missing_subtype_is_wildcard() {
        assert_eq!(MediaRange::new("application").subtype(), "*");
    }

    #[test]
    fn wildcard_subtype_matching() {
        let range = MediaRange::new("application/*");
        assert!(range.includes(&MediaRange::new("application/json")));
        assert!(!range.includes(&MediaRange::new("text/plain")));
    }

    #[test]
    fn full_wildcard_matches_everything() {
        assert!(MediaRange::any().includes(&MediaRange::new("image/png")));
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        assert!(MediaRange::new("TEXT/PLAIN").includes(&MediaRange::new("text/plain")));
    }
}
