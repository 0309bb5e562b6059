//! Exclude patterns.
//!
//! Not glob semantics: a pattern is cut at every `*` into literal segments and
//! a path is excluded when it contains all of them, in order. `**/dist/**`
//! excludes any path with a `/dist/` component, `**/*.min.js` any path ending
//! in `.min.js` somewhere after a slash.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ExcludePattern {
    raw: String,
    segments: Vec<String>,
}

impl ExcludePattern {
    pub fn new(pattern: &str) -> Self {
        let normalized = normalize(pattern);
        let segments = normalized
            .split('*')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &Path) -> bool {
        if self.segments.is_empty() {
            return false;
        }
        let candidate = rooted(&normalize(&path.to_string_lossy()));
        matches_segments(&candidate, &self.segments)
    }
}

impl From<String> for ExcludePattern {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<ExcludePattern> for String {
    fn from(pattern: ExcludePattern) -> Self {
        pattern.raw
    }
}

/// Whether any pattern in the set excludes `path`.
pub fn is_excluded(patterns: &[ExcludePattern], path: &Path) -> bool {
    patterns.iter().any(|pattern| pattern.matches(path))
}

fn normalize(text: &str) -> String {
    text.replace('\\', "/")
}

// A relative path gets a leading slash so `**/name/**` also matches a
// top-level `name/` directory.
fn rooted(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn matches_segments(haystack: &str, segments: &[String]) -> bool {
    let mut rest = haystack;
    for segment in segments {
        match rest.find(segment.as_str()) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }
    true
}
