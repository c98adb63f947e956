//! Key-level diff between two flat mappings.
//!
//! Keys are classified as added, modified or removed. By default keys that
//! exist on only one side, in either direction, are pooled into `added`;
//! [`RemovalPolicy::Separate`] reports base-only keys in `removed` instead.
//!
//! # Examples
//!
//! ```
//! use locale_diff::diff;
//! use std::collections::BTreeMap;
//!
//! let base = BTreeMap::from([("x", 1)]);
//! let modified = BTreeMap::from([("x", 2), ("y", 3)]);
//!
//! let result = diff(&base, &modified);
//! assert_eq!(result.added, BTreeMap::from([("y", 3)]));
//! assert_eq!(result.modified, BTreeMap::from([("x", 1)]));
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

/// Where keys that exist only in the base mapping are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Base-only keys are reported in `added` alongside modified-only keys.
    #[default]
    Pooled,
    /// Base-only keys are reported in `removed`.
    Separate,
}

/// Configuration for the diff algorithm.
#[derive(Debug, Clone, Default)]
pub struct DiffConfig {
    pub removals: RemovalPolicy,
}

/// Statistics about the diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
}

impl DiffStats {
    /// Returns the total number of changes.
    pub fn total_changes(&self) -> usize {
        self.added + self.modified + self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// The classified keys of two mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDiff<K, V> {
    /// Keys present on one side only (see [`RemovalPolicy`]).
    pub added: BTreeMap<K, V>,
    /// Keys present on both sides with unequal values, holding the base value.
    pub modified: BTreeMap<K, V>,
    /// Base-only keys under [`RemovalPolicy::Separate`]; empty otherwise.
    pub removed: BTreeMap<K, V>,
}

impl<K, V> MapDiff<K, V> {
    pub fn new() -> Self {
        Self {
            added: BTreeMap::new(),
            modified: BTreeMap::new(),
            removed: BTreeMap::new(),
        }
    }

    /// Returns true if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats {
            added: self.added.len(),
            modified: self.modified.len(),
            removed: self.removed.len(),
        }
    }
}

impl<K, V> Default for MapDiff<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Diffs two mappings with the default configuration.
pub fn diff<K, V>(base: &BTreeMap<K, V>, modified: &BTreeMap<K, V>) -> MapDiff<K, V>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    compute_diff(base, modified, &DiffConfig::default())
}

/// Classifies every key of `base` and `modified`.
///
/// Values are compared with `PartialEq`; for [`Scalar`](crate::Scalar) that
/// means values of different kinds never compare equal.
pub fn compute_diff<K, V>(
    base: &BTreeMap<K, V>,
    modified: &BTreeMap<K, V>,
    config: &DiffConfig,
) -> MapDiff<K, V>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    let mut result = MapDiff::new();

    for (key, value) in base {
        match modified.get(key) {
            None => {
                let target = match config.removals {
                    RemovalPolicy::Pooled => &mut result.added,
                    RemovalPolicy::Separate => &mut result.removed,
                };
                target.insert(key.clone(), value.clone());
            }
            Some(other) if other != value => {
                result.modified.insert(key.clone(), value.clone());
            }
            Some(_) => {}
        }
    }

    for (key, value) in modified {
        if !base.contains_key(key) {
            result.added.insert(key.clone(), value.clone());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_stats_total_changes() {
        let stats = DiffStats {
            added: 2,
            modified: 3,
            removed: 1,
        };
        assert_eq!(stats.total_changes(), 6);
        assert!(!stats.is_empty());
        assert!(DiffStats::default().is_empty());
    }

    #[test]
    fn test_added_is_pooled_in_both_directions() {
        let small = BTreeMap::from([("x", 1)]);
        let large = BTreeMap::from([("x", 1), ("y", 2)]);

        let forward = diff(&small, &large);
        let backward = diff(&large, &small);

        assert_eq!(forward.added, BTreeMap::from([("y", 2)]));
        assert_eq!(backward.added, BTreeMap::from([("y", 2)]));
        assert!(forward.modified.is_empty());
        assert!(backward.removed.is_empty());
    }

    #[test]
    fn test_modified_takes_base_value() {
        let result = diff(&BTreeMap::from([("x", 1)]), &BTreeMap::from([("x", 2)]));
        assert_eq!(result.modified, BTreeMap::from([("x", 1)]));
        assert!(result.added.is_empty());
        assert_eq!(result.stats().modified, 1);
    }

    #[test]
    fn test_separate_removals() {
        let config = DiffConfig {
            removals: RemovalPolicy::Separate,
        };
        let base = BTreeMap::from([("gone", "a"), ("kept", "b")]);
        let modified = BTreeMap::from([("kept", "b"), ("new", "c")]);

        let result = compute_diff(&base, &modified, &config);
        assert_eq!(result.added, BTreeMap::from([("new", "c")]));
        assert_eq!(result.removed, BTreeMap::from([("gone", "a")]));
        assert!(result.modified.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let empty: BTreeMap<String, i32> = BTreeMap::new();
        assert!(diff(&empty, &empty).is_empty());
    }
}
