//! Narrowing a diff down to the translation keys a reviewer cares about.
//!
//! Patterns are dotted like key paths. A `*` segment stands for exactly one
//! key and a `**` segment for any run of keys, the empty run included. So
//! `errors.**` covers the whole `errors` namespace and `**.tooltip` covers
//! every tooltip wherever it is nested.
//!
//! ```
//! use locale_diff::filter::PathPattern;
//! use locale_diff::KeyPath;
//!
//! let pattern = PathPattern::parse("menu.*");
//! assert!(pattern.matches(&KeyPath::parse("menu.open")));
//! assert!(!pattern.matches(&KeyPath::parse("menu.file.open")));
//!
//! let pattern = PathPattern::parse("**.tooltip");
//! assert!(pattern.matches(&KeyPath::parse("toolbar.save.tooltip")));
//! ```

use crate::diff::MapDiff;
use crate::keypath::{KeyPath, DELIMITER};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    Literal(String),
    /// `*`
    SingleWildcard,
    /// `**`
    DoubleWildcard,
}

impl PatternSegment {
    // Whether this segment consumes `key` when it stands for a single key.
    fn accepts(&self, key: &str) -> bool {
        match self {
            PatternSegment::Literal(literal) => literal == key,
            PatternSegment::SingleWildcard | PatternSegment::DoubleWildcard => true,
        }
    }
}

/// A parsed key pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    pub segments: Vec<PatternSegment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split(DELIMITER)
            .map(|s| match s {
                "**" => PatternSegment::DoubleWildcard,
                "*" => PatternSegment::SingleWildcard,
                _ => PatternSegment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn matches(&self, path: &KeyPath) -> bool {
        matches_segments(&self.segments, path.segments())
    }
}

fn matches_segments(pattern: &[PatternSegment], path: &[String]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((PatternSegment::DoubleWildcard, rest)) => {
            matches_segments(rest, path)
                || path
                    .split_first()
                    .is_some_and(|(_, tail)| matches_segments(pattern, tail))
        }
        Some((segment, rest)) => path
            .split_first()
            .is_some_and(|(key, tail)| segment.accepts(key) && matches_segments(rest, tail)),
    }
}

/// Which keys of a diff get reported. An ignored key is dropped even when
/// an `only` pattern also matches it.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub ignore_patterns: Vec<PathPattern>,
    /// Empty means every key not ignored.
    pub only_patterns: Vec<PathPattern>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.ignore_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn only(mut self, pattern: &str) -> Self {
        self.only_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.ignore_patterns.is_empty() || !self.only_patterns.is_empty()
    }

    pub fn should_include(&self, path: &KeyPath) -> bool {
        if self.ignore_patterns.iter().any(|p| p.matches(path)) {
            return false;
        }

        self.only_patterns.is_empty() || self.only_patterns.iter().any(|p| p.matches(path))
    }
}

/// Drops every key the filter excludes from all three classes of a diff.
pub fn filter_diff<V: Clone>(
    diff: &MapDiff<KeyPath, V>,
    config: &FilterConfig,
) -> MapDiff<KeyPath, V> {
    if !config.has_filters() {
        return diff.clone();
    }

    MapDiff {
        added: retain(&diff.added, config),
        modified: retain(&diff.modified, config),
        removed: retain(&diff.removed, config),
    }
}

fn retain<V: Clone>(map: &BTreeMap<KeyPath, V>, config: &FilterConfig) -> BTreeMap<KeyPath, V> {
    map.iter()
        .filter(|(path, _)| config.should_include(path))
        .map(|(path, value)| (path.clone(), value.clone()))
        .collect()
}
