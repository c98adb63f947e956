//! Where locale documents come from.
//!
//! A [`DocumentSource`] hands out parsed documents keyed by locale name. The
//! filesystem source reads a single locale file or a directory of them; other
//! backends (a version-control checkout, an HTTP bundle) plug in through the
//! same trait.

use crate::error::{ParseError, SourceError};
use crate::parser::{parse_file, SUPPORTED_EXTENSIONS};
use crate::tree::Document;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Documents of one source, keyed by locale. A document that failed to parse
/// is kept as its error so the other locales remain comparable.
pub type LoadedDocuments = BTreeMap<String, Result<Document, ParseError>>;

pub trait DocumentSource {
    /// Human readable name used in reports.
    fn label(&self) -> String;

    /// Loads the documents for `locale`, or every document when `None`.
    ///
    /// An empty result means nothing matched.
    fn documents(&self, locale: Option<&str>) -> Result<LoadedDocuments, SourceError>;
}

/// A command-line source argument: `PATH` or `PATH:LOCALE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSelector {
    pub path: PathBuf,
    pub locale: Option<String>,
}

impl SourceSelector {
    /// Splits an optional `:locale` suffix off `arg`.
    ///
    /// The suffix only counts when it holds no path separator and something
    /// precedes the colon, so `C:\locales` stays a path.
    pub fn parse(arg: &str) -> Self {
        if let Some((path, locale)) = arg.rsplit_once(':') {
            let is_locale = !path.is_empty()
                && !locale.is_empty()
                && !locale.contains(['/', '\\']);
            if is_locale {
                return Self {
                    path: PathBuf::from(path),
                    locale: Some(locale.to_string()),
                };
            }
        }
        Self {
            path: PathBuf::from(arg),
            locale: None,
        }
    }
}

/// Locale files on disk: either one file or a directory of `<locale>.<ext>`.
///
/// When a directory holds the same locale in several formats, the file whose
/// name sorts first is used (`en.json` before `en.toml`, `en.yaml`, `en.yml`).
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_file(&self, locale: Option<&str>) -> LoadedDocuments {
        let mut result = LoadedDocuments::new();
        let Some(stem) = locale_of(&self.root) else {
            return result;
        };
        if locale.is_some_and(|wanted| wanted != stem) {
            debug!(path = %self.root.display(), locale = ?locale, "file does not hold the requested locale");
            return result;
        }
        result.insert(stem, parse_file(&self.root));
        result
    }

    fn load_dir(&self, locale: Option<&str>) -> Result<LoadedDocuments, SourceError> {
        let io_error = |source: std::io::Error| SourceError::Io {
            path: self.root.display().to_string(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && is_locale_file(&path) {
                paths.push(path);
            }
        }
        // read_dir order is filesystem dependent.
        paths.sort();

        let mut result = LoadedDocuments::new();
        for path in paths {
            let Some(stem) = locale_of(&path) else {
                continue;
            };
            if locale.is_some_and(|wanted| wanted != stem) {
                continue;
            }
            if result.contains_key(&stem) {
                warn!(path = %path.display(), locale = %stem, "locale already loaded from another file, skipping");
                continue;
            }
            debug!(path = %path.display(), locale = %stem, "loading locale file");
            result.insert(stem, parse_file(&path));
        }
        Ok(result)
    }
}

impl DocumentSource for FsSource {
    fn label(&self) -> String {
        self.root.display().to_string()
    }

    fn documents(&self, locale: Option<&str>) -> Result<LoadedDocuments, SourceError> {
        if self.root.is_dir() {
            self.load_dir(locale)
        } else if self.root.is_file() {
            Ok(self.load_file(locale))
        } else {
            Err(SourceError::NotFound {
                path: self.root.display().to_string(),
            })
        }
    }
}

/// Already-parsed documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    label: String,
    documents: BTreeMap<String, Document>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            documents: BTreeMap::new(),
        }
    }

    pub fn with_document(mut self, locale: impl Into<String>, document: Document) -> Self {
        self.documents.insert(locale.into(), document);
        self
    }
}

impl DocumentSource for MemorySource {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn documents(&self, locale: Option<&str>) -> Result<LoadedDocuments, SourceError> {
        Ok(self
            .documents
            .iter()
            .filter(|(name, _)| locale.map_or(true, |wanted| wanted == name.as_str()))
            .map(|(name, doc)| (name.clone(), Ok(doc.clone())))
            .collect())
    }
}

fn is_locale_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn locale_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_with_locale() {
        let selector = SourceSelector::parse("develop/locales:en");
        assert_eq!(selector.path, PathBuf::from("develop/locales"));
        assert_eq!(selector.locale.as_deref(), Some("en"));
    }

    #[test]
    fn test_selector_without_locale() {
        assert_eq!(SourceSelector::parse("locales").locale, None);
        assert_eq!(SourceSelector::parse("locales:").locale, None);
        assert_eq!(SourceSelector::parse(":en").locale, None);
        let windows = SourceSelector::parse(r"C:\work\locales");
        assert_eq!(windows.locale, None);
        assert_eq!(windows.path, PathBuf::from(r"C:\work\locales"));
    }

    #[test]
    fn test_memory_source_filters_by_locale() {
        let source = MemorySource::new("memory")
            .with_document("en", Document::new())
            .with_document("fr", Document::new());

        assert_eq!(source.documents(None).unwrap().len(), 2);
        let fr = source.documents(Some("fr")).unwrap();
        assert_eq!(fr.keys().collect::<Vec<_>>(), vec!["fr"]);
        assert!(source.documents(Some("de")).unwrap().is_empty());
    }

    #[test]
    fn test_is_locale_file() {
        assert!(is_locale_file(Path::new("en.json")));
        assert!(is_locale_file(Path::new("fr.YML")));
        assert!(!is_locale_file(Path::new("README.md")));
        assert!(!is_locale_file(Path::new("Makefile")));
    }
}
