//! Conversion between nested documents and flat key-path mappings.
//!
//! `flatten` turns `{"menu": {"open": "Open"}}` into `{"menu.open": "Open"}`,
//! `unflatten` goes back the other way.
//!
//! # Examples
//!
//! ```
//! use locale_diff::{flatten, unflatten, parse_json, KeyPath, Scalar};
//!
//! let doc = parse_json(r#"{"menu": {"open": "Open", "close": "Close"}}"#).unwrap();
//! let flat = flatten(&doc);
//! assert_eq!(flat.get(&KeyPath::parse("menu.open")), Some(&Scalar::from("Open")));
//! assert_eq!(unflatten(&flat), doc);
//! ```

use crate::error::DocumentError;
use crate::keypath::KeyPath;
use crate::tree::{Document, Node, Scalar};
use std::collections::BTreeMap;

/// Leaves of a document keyed by their full path.
pub type FlatMap = BTreeMap<KeyPath, Scalar>;

/// Flattens a document into one entry per leaf.
///
/// Nested mappings contribute no entry of their own, so an empty mapping
/// disappears.
pub fn flatten(doc: &Document) -> FlatMap {
    let mut result = FlatMap::new();
    flatten_into(doc, &KeyPath::root(), &mut result);
    result
}

/// Flattens an arbitrary node, which must be a mapping.
pub fn flatten_node(node: &Node) -> Result<FlatMap, DocumentError> {
    match node {
        Node::Object(doc) => Ok(flatten(doc)),
        Node::Scalar(scalar) => Err(DocumentError::not_a_mapping(
            KeyPath::root().to_string(),
            scalar.type_name(),
        )),
    }
}

fn flatten_into(doc: &Document, prefix: &KeyPath, result: &mut FlatMap) {
    for (key, value) in doc {
        let path = prefix.child(key.as_str());
        match value {
            Node::Object(nested) => flatten_into(nested, &path, result),
            Node::Scalar(scalar) => {
                result.insert(path, scalar.clone());
            }
        }
    }
}

/// Rebuilds a nested document from flat entries.
///
/// When one path is a prefix of another (`a` and `a.b`), the shorter path is
/// written first and the longer one then replaces the leaf with a mapping, so
/// `{"a": "leaf", "a.b": "nested"}` becomes `{"a": {"b": "nested"}}`.
pub fn unflatten(flat: &FlatMap) -> Document {
    let mut entries: Vec<(&KeyPath, &Scalar)> = flat.iter().collect();
    // Stable: unrelated paths keep map order.
    entries.sort_by_key(|(path, _)| path.len());

    let mut doc = Document::new();
    for (path, value) in entries {
        set_path(&mut doc, path, value.clone());
    }
    doc
}

/// Writes `value` at `path`, creating intermediate mappings as needed.
///
/// An intermediate key that currently holds a scalar is replaced by an empty
/// mapping. Writing to the root path does nothing.
pub fn set_path(doc: &mut Document, path: &KeyPath, value: Scalar) {
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };

    let mut current = doc;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Node::Object(Document::new()));
        if let Node::Scalar(_) = slot {
            *slot = Node::Object(Document::new());
        }
        let Node::Object(map) = slot else {
            return;
        };
        current = map;
    }
    current.insert(last.clone(), Node::Scalar(value));
}
