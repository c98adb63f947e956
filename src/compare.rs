//! End-to-end comparison of two document sources.
//!
//! Both sides are loaded, paired by locale, flattened, diffed and filtered.
//! Each pair is reported on its own: a document that cannot be loaded fails
//! its pair only.
//!
//! # Examples
//!
//! ```
//! use locale_diff::{compare_sources, parse_json, CompareOptions, MemorySource};
//!
//! let origin = MemorySource::new("develop")
//!     .with_document("en", parse_json(r#"{"menu": {"open": "Open"}}"#).unwrap());
//! let modified = MemorySource::new("feature")
//!     .with_document("en", parse_json(r#"{"menu": {"open": "Open", "close": "Close"}}"#).unwrap());
//!
//! let reports = compare_sources(&origin, &modified, &CompareOptions::default()).unwrap();
//! let diff = reports[0].outcome.as_ref().unwrap();
//! assert_eq!(diff.added.len(), 1);
//! ```

use crate::diff::{compute_diff, DiffConfig, MapDiff};
use crate::error::{DocumentError, ParseError, SourceError};
use crate::filter::{filter_diff, FilterConfig};
use crate::flatten::{flatten, FlatMap};
use crate::keypath::KeyPath;
use crate::source::{DocumentSource, LoadedDocuments};
use crate::tree::{Document, Node, Scalar};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// The diff of two locale documents.
pub type LocaleDiff = MapDiff<KeyPath, Scalar>;

/// Which side of a comparison something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Origin,
    Modified,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Origin => f.write_str("origin"),
            Side::Modified => f.write_str("modified"),
        }
    }
}

/// Why a document pair could not be compared.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No {side} document found for locale {locale}")]
    Missing { side: Side, locale: String },

    #[error("Several {side} documents found ({}), pick one with --locale", candidates.join(", "))]
    Ambiguous { side: Side, candidates: Vec<String> },

    #[error("Cannot compare scope {scope}: {source}")]
    Scope {
        scope: String,
        #[source]
        source: DocumentError,
    },
}

/// Options of one comparison run.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Locale to read from the modified source.
    pub modified_locale: Option<String>,
    /// Locale to read from the origin source; defaults to `modified_locale`.
    pub origin_locale: Option<String>,
    /// Compare every locale found on either side instead of a single pair.
    pub all_locales: bool,
    /// Compare only the mapping found at this path. Reported keys keep their
    /// full paths.
    pub scope: Option<KeyPath>,
    pub diff: DiffConfig,
    pub filter: FilterConfig,
}

impl CompareOptions {
    fn origin_locale(&self) -> Option<&str> {
        self.origin_locale
            .as_deref()
            .or(self.modified_locale.as_deref())
    }
}

/// Identifies one document of a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLabel {
    pub source: String,
    pub locale: String,
}

impl fmt::Display for DocumentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.locale)
    }
}

/// The result for one origin/modified document pair.
#[derive(Debug)]
pub struct DocumentReport {
    pub origin: DocumentLabel,
    pub modified: DocumentLabel,
    pub outcome: Result<LocaleDiff, CompareError>,
}

impl DocumentReport {
    pub fn has_changes(&self) -> bool {
        self.outcome.as_ref().is_ok_and(|diff| !diff.is_empty())
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Flattens both documents and diffs them, origin as the base.
///
/// Changed keys therefore carry the origin's value. Swap the arguments to get
/// the modified document's values instead.
pub fn compare_documents(
    origin: &Document,
    modified: &Document,
    config: &DiffConfig,
) -> LocaleDiff {
    compute_diff(&flatten(origin), &flatten(modified), config)
}

/// Compares the documents of two sources.
///
/// Only failures to enumerate a source are returned as `Err`; anything wrong
/// with an individual document ends up in that pair's report.
pub fn compare_sources(
    origin: &dyn DocumentSource,
    modified: &dyn DocumentSource,
    options: &CompareOptions,
) -> Result<Vec<DocumentReport>, SourceError> {
    if options.all_locales {
        compare_all(origin, modified, options)
    } else {
        Ok(vec![compare_single(origin, modified, options)?])
    }
}

fn compare_single(
    origin: &dyn DocumentSource,
    modified: &dyn DocumentSource,
    options: &CompareOptions,
) -> Result<DocumentReport, SourceError> {
    let modified_docs = modified.documents(options.modified_locale.as_deref())?;
    let origin_docs = origin.documents(options.origin_locale())?;
    debug!(
        origin = %origin.label(),
        modified = %modified.label(),
        origin_documents = origin_docs.len(),
        modified_documents = modified_docs.len(),
        "loaded sources"
    );

    let modified_pick = pick(
        modified_docs,
        Side::Modified,
        options.modified_locale.as_deref(),
    );
    let origin_pick = pick(origin_docs, Side::Origin, options.origin_locale());

    let modified_label = DocumentLabel {
        source: modified.label(),
        locale: modified_pick.0,
    };
    let origin_label = DocumentLabel {
        source: origin.label(),
        locale: origin_pick.0,
    };

    let outcome = match (origin_pick.1, modified_pick.1) {
        (Ok(origin_doc), Ok(modified_doc)) => {
            diff_pair(&origin_doc, &modified_doc, options)
        }
        (Err(err), _) | (_, Err(err)) => Err(err),
    };

    Ok(DocumentReport {
        origin: origin_label,
        modified: modified_label,
        outcome,
    })
}

// Chooses the single document of one side, returning its locale name.
fn pick(
    mut docs: LoadedDocuments,
    side: Side,
    wanted: Option<&str>,
) -> (String, Result<Document, CompareError>) {
    let fallback = wanted.unwrap_or("*").to_string();
    if docs.len() > 1 {
        return (
            fallback,
            Err(CompareError::Ambiguous {
                side,
                candidates: docs.into_keys().collect(),
            }),
        );
    }
    match docs.pop_first() {
        Some((locale, doc)) => (locale, doc.map_err(CompareError::from)),
        None => (
            fallback.clone(),
            Err(CompareError::Missing {
                side,
                locale: fallback,
            }),
        ),
    }
}

fn compare_all(
    origin: &dyn DocumentSource,
    modified: &dyn DocumentSource,
    options: &CompareOptions,
) -> Result<Vec<DocumentReport>, SourceError> {
    let mut origin_docs = origin.documents(None)?;
    let mut modified_docs = modified.documents(None)?;

    let locales: BTreeSet<String> = origin_docs
        .keys()
        .chain(modified_docs.keys())
        .cloned()
        .collect();
    debug!(count = locales.len(), "comparing every locale");

    let mut reports = Vec::with_capacity(locales.len());
    for locale in locales {
        let origin_doc = origin_docs.remove(&locale);
        let modified_doc = modified_docs.remove(&locale);

        let outcome = match (origin_doc, modified_doc) {
            (Some(Ok(origin_doc)), Some(Ok(modified_doc))) => {
                diff_pair(&origin_doc, &modified_doc, options)
            }
            (Some(Err(err)), _) | (_, Some(Err(err))) => Err(CompareError::from(err)),
            (None, _) => Err(CompareError::Missing {
                side: Side::Origin,
                locale: locale.clone(),
            }),
            (_, None) => Err(CompareError::Missing {
                side: Side::Modified,
                locale: locale.clone(),
            }),
        };

        if let Err(err) = &outcome {
            warn!(locale = %locale, error = %err, "locale could not be compared");
        }

        reports.push(DocumentReport {
            origin: DocumentLabel {
                source: origin.label(),
                locale: locale.clone(),
            },
            modified: DocumentLabel {
                source: modified.label(),
                locale,
            },
            outcome,
        });
    }

    Ok(reports)
}

fn diff_pair(
    origin: &Document,
    modified: &Document,
    options: &CompareOptions,
) -> Result<LocaleDiff, CompareError> {
    let diff = match &options.scope {
        Some(scope) => {
            let origin = subtree(origin, scope)?;
            let modified = subtree(modified, scope)?;
            rebase(compare_documents(&origin, &modified, &options.diff), scope)
        }
        None => compare_documents(origin, modified, &options.diff),
    };
    let diff = filter_diff(&diff, &options.filter);
    debug!(
        added = diff.added.len(),
        modified = diff.modified.len(),
        removed = diff.removed.len(),
        "compared documents"
    );
    Ok(diff)
}

// The mapping at `scope`; a scope absent from the document is empty.
fn subtree(doc: &Document, scope: &KeyPath) -> Result<Document, CompareError> {
    let scope_error = |source| CompareError::Scope {
        scope: scope.to_string(),
        source,
    };

    let root = Node::Object(doc.clone());
    match root.lookup(scope).map_err(scope_error)? {
        None => Ok(Document::new()),
        Some(Node::Object(map)) => Ok(map.clone()),
        Some(Node::Scalar(scalar)) => Err(scope_error(DocumentError::not_a_mapping(
            scope.to_string(),
            scalar.type_name(),
        ))),
    }
}

fn rebase(diff: LocaleDiff, scope: &KeyPath) -> LocaleDiff {
    let prefix = |map: FlatMap| -> FlatMap {
        map.into_iter()
            .map(|(path, value)| (scope.join(&path), value))
            .collect()
    };
    MapDiff {
        added: prefix(diff.added),
        modified: prefix(diff.modified),
        removed: prefix(diff.removed),
    }
}
