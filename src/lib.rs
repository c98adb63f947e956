//! locale-diff - compare localization files between two revisions.
//!
//! Locale documents are nested key/value trees. This library flattens them
//! into dotted key paths, diffs the flat mappings to find added, modified and
//! removed translation keys, and re-nests the results for display.
//!
//! # Example
//!
//! ```
//! use locale_diff::{diff, flatten, parse_json, unflatten, KeyPath, Scalar};
//!
//! let develop = parse_json(r#"{"menu": {"open": "Open"}}"#).unwrap();
//! let feature = parse_json(r#"{"menu": {"open": "Open", "close": "Close"}}"#).unwrap();
//!
//! let changes = diff(&flatten(&develop), &flatten(&feature));
//! assert_eq!(
//!     changes.added.get(&KeyPath::parse("menu.close")),
//!     Some(&Scalar::from("Close"))
//! );
//!
//! let nested = unflatten(&changes.added);
//! assert!(nested.contains_key("menu"));
//! ```

pub mod compare;
pub mod diff;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod keypath;
pub mod output;
pub mod parser;
pub mod source;
pub mod tree;

// Re-export commonly used types for convenience
pub use compare::{
    compare_documents, compare_sources, CompareError, CompareOptions, DocumentLabel,
    DocumentReport, LocaleDiff, Side,
};
pub use diff::{compute_diff, diff, DiffConfig, DiffStats, MapDiff, RemovalPolicy};
pub use error::{DocumentError, LocaleDiffError, OutputError, ParseError, SourceError};
pub use filter::{filter_diff, FilterConfig, PathPattern};
pub use flatten::{flatten, flatten_node, set_path, unflatten, FlatMap};
pub use keypath::{KeyPath, DELIMITER};
pub use output::{format_reports, OutputFormat, OutputOptions};
pub use parser::{parse_content, parse_file, parse_json, parse_toml, parse_yaml, FormatHint};
pub use source::{DocumentSource, FsSource, MemorySource, SourceSelector};
pub use tree::{Document, Node, Scalar};
