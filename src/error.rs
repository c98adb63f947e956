//! Custom error types for locale-diff.

/// Errors raised while shaping parsed data into the typed document model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("Unsupported key type at {path}: {key}")]
    UnsupportedKeyType { path: String, key: String },

    #[error("Expected a mapping at {path}, found {found}")]
    NotAMapping { path: String, found: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not detect file format for {path}")]
    UnknownFormat { path: String },

    #[error("Unusable document {path}: {source}")]
    Document {
        path: String,
        #[source]
        source: DocumentError,
    },
}

/// Errors raised while enumerating the documents of a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source not found: {path}")]
    NotFound { path: String },

    #[error("Failed to list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to serialize to JSON: {source}")]
    JsonSerializationError {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LocaleDiffError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },
}

impl DocumentError {
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
            found: found.into(),
        }
    }

    pub fn unsupported_key(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UnsupportedKeyType {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn not_a_mapping(path: impl Into<String>, found: impl Into<String>) -> Self {
        Self::NotAMapping {
            path: path.into(),
            found: found.into(),
        }
    }
}

impl ParseError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn json_error(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonError {
            path: path.into(),
            source,
        }
    }

    pub fn yaml_error(path: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::YamlError {
            path: path.into(),
            source,
        }
    }

    pub fn toml_error(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::TomlError {
            path: path.into(),
            source,
        }
    }

    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::UnknownFormat { path: path.into() }
    }

    pub fn document(path: impl Into<String>, source: DocumentError) -> Self {
        Self::Document {
            path: path.into(),
            source,
        }
    }
}
