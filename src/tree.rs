//! Typed representation of localization documents.

use crate::error::DocumentError;
use crate::keypath::KeyPath;
use std::collections::BTreeMap;

/// A mapping from key to child node. Key order carries no meaning.
pub type Document = BTreeMap<String, Node>;

/// A terminal value in a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A leaf with neither scalar nor mapping shape (arrays), kept verbatim.
    Opaque(serde_json::Value),
}

/// A value in a document: either a leaf or a nested mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Object(Document),
}

impl Scalar {
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::String(_) => "string",
            Scalar::Opaque(_) => "opaque",
        }
    }

    /// Returns a short preview of the value, truncated to max_len.
    pub fn preview(&self, max_len: usize) -> String {
        let preview = match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => format_number(*n),
            Scalar::String(s) => format!("\"{}\"", s),
            Scalar::Opaque(value) => value.to_string(),
        };

        if preview.chars().count() > max_len {
            let kept: String = preview.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            preview
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
            Scalar::Number(n) => number_to_json(*n),
            Scalar::String(s) => serde_json::Value::String(s.clone()),
            Scalar::Opaque(value) => value.clone(),
        }
    }
}

impl Node {
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Scalar(scalar) => scalar.type_name(),
            Node::Object(_) => "mapping",
        }
    }

    pub fn as_object(&self) -> Option<&Document> {
        match self {
            Node::Object(map) => Some(map),
            Node::Scalar(_) => None,
        }
    }

    /// Resolves `path` beneath this node.
    ///
    /// Returns `Ok(None)` when a key is absent and `TypeMismatch` when the path
    /// runs through a scalar.
    pub fn lookup(&self, path: &KeyPath) -> Result<Option<&Node>, DocumentError> {
        let mut current = self;
        for (depth, segment) in path.segments().iter().enumerate() {
            let map = match current {
                Node::Object(map) => map,
                Node::Scalar(scalar) => {
                    let walked = KeyPath::new(path.segments()[..depth].iter().cloned());
                    return Err(DocumentError::type_mismatch(
                        walked.to_string(),
                        "mapping",
                        scalar.type_name(),
                    ));
                }
            };
            match map.get(segment) {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Node::Scalar(scalar) => scalar.to_json(),
            Node::Object(map) => document_to_json(map),
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

pub fn document_to_json(doc: &Document) -> serde_json::Value {
    let obj: serde_json::Map<String, serde_json::Value> = doc
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect();
    serde_json::Value::Object(obj)
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// Whole numbers go back out as integers so "count": 3 does not print as 3.0.
fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut menu = Document::new();
        menu.insert("open".to_string(), Scalar::from("Open").into());
        let mut root = Document::new();
        root.insert("menu".to_string(), Node::Object(menu));
        root.insert("title".to_string(), Scalar::from("Editor").into());
        Node::Object(root)
    }

    #[test]
    fn test_cross_variant_scalars_are_unequal() {
        assert_ne!(Scalar::from("1"), Scalar::Number(1.0));
        assert_ne!(Scalar::Null, Scalar::Bool(false));
        assert_eq!(Scalar::Number(2.0), Scalar::Number(2.0));
    }

    #[test]
    fn test_preview_truncates() {
        let scalar = Scalar::from("a rather long translation");
        assert_eq!(scalar.preview(10), "\"a rath...");
        assert_eq!(Scalar::Number(3.0).preview(80), "3");
        assert_eq!(Scalar::Number(2.5).preview(80), "2.5");
    }

    #[test]
    fn test_lookup() {
        let root = sample();
        let found = root.lookup(&KeyPath::parse("menu.open")).unwrap();
        assert_eq!(found, Some(&Node::Scalar(Scalar::from("Open"))));
        assert_eq!(root.lookup(&KeyPath::parse("menu.close")).unwrap(), None);
        assert_eq!(root.lookup(&KeyPath::root()).unwrap(), Some(&root));
    }

    #[test]
    fn test_lookup_through_scalar_is_type_mismatch() {
        let root = sample();
        let err = root.lookup(&KeyPath::parse("title.short")).unwrap_err();
        assert_eq!(err, DocumentError::type_mismatch("title", "mapping", "string"));
    }

    #[test]
    fn test_to_json_keeps_integers() {
        let json = Scalar::Number(3.0).to_json();
        assert_eq!(json, serde_json::json!(3));
        assert_eq!(sample().to_json()["menu"]["open"], serde_json::json!("Open"));
    }
}
