//! Parsing of locale files (JSON, YAML, TOML) into typed documents.
//!
//! Every format is converted into the same [`Document`] model at parse time.
//! A file's root must be a mapping. Sequences are kept as opaque leaves.
//!
//! # Examples
//!
//! ```no_run
//! use locale_diff::parser::parse_file;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let en = parse_file(Path::new("locales/en.json"))?;
//! let fr = parse_file(Path::new("locales/fr.yaml"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::{DocumentError, ParseError};
use crate::keypath::KeyPath;
use crate::tree::{Document, Node, Scalar};
use std::fs;
use std::path::Path;

/// Label used in errors for content that did not come from a file.
const INLINE_INPUT: &str = "<input>";

/// Extensions recognised as locale files.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml"];

/// Format hint for parsing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
    /// Try JSON, then YAML, then TOML.
    Auto,
}

impl FormatHint {
    /// Picks a format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("json") => FormatHint::Json,
            Some("yaml") | Some("yml") => FormatHint::Yaml,
            Some("toml") => FormatHint::Toml,
            _ => FormatHint::Auto,
        }
    }
}

/// Parses a locale file into a document.
///
/// # Errors
///
/// - `ParseError::FileNotFound` if the file does not exist
/// - `ParseError::ReadError` if it cannot be read
/// - a syntax error for the detected format
/// - `ParseError::UnknownFormat` if no format accepts content with an unknown extension
/// - `ParseError::Document` if the content cannot be shaped into a document
pub fn parse_file(path: &Path) -> Result<Document, ParseError> {
    let label = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(ParseError::file_not_found(label));
    }

    let content = fs::read_to_string(path).map_err(|e| ParseError::read_error(&label, e))?;
    parse_labeled(&content, FormatHint::from_path(path), &label)
}

/// Parses in-memory content with the given format hint.
pub fn parse_content(content: &str, hint: FormatHint) -> Result<Document, ParseError> {
    parse_labeled(content, hint, INLINE_INPUT)
}

pub fn parse_json(content: &str) -> Result<Document, ParseError> {
    parse_content(content, FormatHint::Json)
}

pub fn parse_yaml(content: &str) -> Result<Document, ParseError> {
    parse_content(content, FormatHint::Yaml)
}

pub fn parse_toml(content: &str) -> Result<Document, ParseError> {
    parse_content(content, FormatHint::Toml)
}

fn parse_labeled(content: &str, hint: FormatHint, label: &str) -> Result<Document, ParseError> {
    match hint {
        FormatHint::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| ParseError::json_error(label, e))?;
            json_root(value).map_err(|e| ParseError::document(label, e))
        }
        FormatHint::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| ParseError::yaml_error(label, e))?;
            yaml_root(value).map_err(|e| ParseError::document(label, e))
        }
        FormatHint::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| ParseError::toml_error(label, e))?;
            toml_table(table, &KeyPath::root()).map_err(|e| ParseError::document(label, e))
        }
        FormatHint::Auto => {
            let mut shape_error = None;
            for hint in [FormatHint::Json, FormatHint::Yaml, FormatHint::Toml] {
                match parse_labeled(content, hint, label) {
                    Ok(doc) => return Ok(doc),
                    Err(err @ ParseError::Document { .. }) => {
                        shape_error.get_or_insert(err);
                    }
                    Err(_) => {}
                }
            }
            // A format that understood the syntax explains the failure better.
            Err(shape_error.unwrap_or_else(|| ParseError::unknown_format(label)))
        }
    }
}

fn json_root(value: serde_json::Value) -> Result<Document, DocumentError> {
    match json_to_node(value, &KeyPath::root())? {
        Node::Object(doc) => Ok(doc),
        Node::Scalar(scalar) => Err(DocumentError::not_a_mapping(
            KeyPath::root().to_string(),
            scalar.type_name(),
        )),
    }
}

fn json_to_node(value: serde_json::Value, path: &KeyPath) -> Result<Node, DocumentError> {
    let scalar = match value {
        serde_json::Value::Null => Scalar::Null,
        serde_json::Value::Bool(b) => Scalar::Bool(b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => Scalar::Number(f),
            None => {
                return Err(DocumentError::type_mismatch(
                    path.to_string(),
                    "number",
                    n.to_string(),
                ))
            }
        },
        serde_json::Value::String(s) => Scalar::String(s),
        array @ serde_json::Value::Array(_) => Scalar::Opaque(array),
        serde_json::Value::Object(obj) => {
            let mut doc = Document::new();
            for (key, child) in obj {
                let node = json_to_node(child, &path.child(key.as_str()))?;
                doc.insert(key, node);
            }
            return Ok(Node::Object(doc));
        }
    };
    Ok(Node::Scalar(scalar))
}

fn yaml_root(value: serde_yaml::Value) -> Result<Document, DocumentError> {
    match yaml_to_node(value, &KeyPath::root())? {
        Node::Object(doc) => Ok(doc),
        Node::Scalar(scalar) => Err(DocumentError::not_a_mapping(
            KeyPath::root().to_string(),
            scalar.type_name(),
        )),
    }
}

fn yaml_to_node(value: serde_yaml::Value, path: &KeyPath) -> Result<Node, DocumentError> {
    let scalar = match value {
        serde_yaml::Value::Null => Scalar::Null,
        serde_yaml::Value::Bool(b) => Scalar::Bool(b),
        serde_yaml::Value::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() => Scalar::Number(f),
            _ => {
                return Err(DocumentError::type_mismatch(
                    path.to_string(),
                    "finite number",
                    n.to_string(),
                ))
            }
        },
        serde_yaml::Value::String(s) => Scalar::String(s),
        serde_yaml::Value::Sequence(seq) => {
            let json = serde_json::to_value(&seq).map_err(|e| {
                DocumentError::type_mismatch(
                    path.to_string(),
                    "JSON-compatible sequence",
                    e.to_string(),
                )
            })?;
            Scalar::Opaque(json)
        }
        serde_yaml::Value::Mapping(map) => {
            let mut doc = Document::new();
            for (key, child) in map {
                let key = yaml_key(key, path)?;
                let node = yaml_to_node(child, &path.child(key.as_str()))?;
                doc.insert(key, node);
            }
            return Ok(Node::Object(doc));
        }
        // Tags carry no meaning for translations, keep the tagged value.
        serde_yaml::Value::Tagged(tagged) => return yaml_to_node(tagged.value, path),
    };
    Ok(Node::Scalar(scalar))
}

fn yaml_key(key: serde_yaml::Value, path: &KeyPath) -> Result<String, DocumentError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        // A float key would carry the delimiter into a single segment.
        serde_yaml::Value::Number(n) if !n.is_f64() => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(DocumentError::unsupported_key(
            path.to_string(),
            format!("{:?}", other),
        )),
    }
}

fn toml_table(table: toml::Table, path: &KeyPath) -> Result<Document, DocumentError> {
    let mut doc = Document::new();
    for (key, value) in table {
        let child_path = path.child(key.as_str());
        let node = toml_to_node(value, &child_path)?;
        doc.insert(key, node);
    }
    Ok(doc)
}

fn toml_to_node(value: toml::Value, path: &KeyPath) -> Result<Node, DocumentError> {
    let scalar = match value {
        toml::Value::String(s) => Scalar::String(s),
        toml::Value::Integer(i) => Scalar::Number(i as f64),
        toml::Value::Float(f) if f.is_finite() => Scalar::Number(f),
        toml::Value::Float(f) => {
            return Err(DocumentError::type_mismatch(
                path.to_string(),
                "finite number",
                f.to_string(),
            ))
        }
        toml::Value::Boolean(b) => Scalar::Bool(b),
        toml::Value::Datetime(dt) => Scalar::String(dt.to_string()),
        toml::Value::Array(arr) => {
            let json = serde_json::to_value(&arr).map_err(|e| {
                DocumentError::type_mismatch(
                    path.to_string(),
                    "JSON-compatible array",
                    e.to_string(),
                )
            })?;
            Scalar::Opaque(json)
        }
        toml::Value::Table(table) => return Ok(Node::Object(toml_table(table, path)?)),
    };
    Ok(Node::Scalar(scalar))
}
