use locale_diff::{
    compare_sources, CompareError, CompareOptions, DocumentSource, FsSource, KeyPath, Node,
    ParseError, Scalar, SourceError,
};
use std::fs;
use tempfile::TempDir;

fn locale_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

#[test]
fn test_directory_lists_supported_files() {
    let dir = locale_dir(&[
        ("en.json", r#"{"a": "A"}"#),
        ("fr.yaml", "a: A"),
        ("de.toml", "a = \"A\""),
        ("README.md", "# not a locale"),
    ]);

    let docs = FsSource::new(dir.path()).documents(None).unwrap();
    let locales: Vec<&str> = docs.keys().map(String::as_str).collect();
    assert_eq!(locales, vec!["de", "en", "fr"]);
    assert!(docs.values().all(|doc| doc.is_ok()));
}

#[test]
fn test_directory_filters_by_locale() {
    let dir = locale_dir(&[("en.json", "{}"), ("fr.json", "{}")]);
    let docs = FsSource::new(dir.path()).documents(Some("fr")).unwrap();
    assert_eq!(docs.len(), 1);
    assert!(docs.contains_key("fr"));
}

#[test]
fn test_broken_file_is_reported_per_locale() {
    let dir = locale_dir(&[("en.json", r#"{"a": "#), ("fr.json", r#"{"a": "A"}"#)]);
    let docs = FsSource::new(dir.path()).documents(None).unwrap();

    assert!(matches!(docs["en"], Err(ParseError::JsonError { .. })));
    assert!(docs["fr"].is_ok());
}

#[test]
fn test_duplicate_locale_prefers_first_file_name() {
    let dir = locale_dir(&[
        ("en.yaml", "greeting: From YAML\n"),
        ("en.json", r#"{"greeting": "From JSON"}"#),
        ("en.toml", "greeting = \"From TOML\""),
    ]);

    for _ in 0..3 {
        let docs = FsSource::new(dir.path()).documents(None).unwrap();
        assert_eq!(docs.len(), 1);
        let en = docs["en"].as_ref().unwrap();
        assert_eq!(en.get("greeting"), Some(&Node::Scalar(Scalar::from("From JSON"))));
    }
}

#[test]
fn test_single_file_is_named_by_stem() {
    let dir = locale_dir(&[("pt-BR.json", r#"{"a": "A"}"#)]);
    let source = FsSource::new(dir.path().join("pt-BR.json"));

    assert!(source.documents(None).unwrap().contains_key("pt-BR"));
    assert!(source.documents(Some("pt-BR")).unwrap().contains_key("pt-BR"));
    assert!(source.documents(Some("en")).unwrap().is_empty());
}

#[test]
fn test_missing_path() {
    let dir = TempDir::new().unwrap();
    let result = FsSource::new(dir.path().join("absent")).documents(None);
    assert!(matches!(result, Err(SourceError::NotFound { .. })));
}

#[test]
fn test_compare_directories_across_formats() {
    let origin = locale_dir(&[("en.yaml", "menu:\n  open: Open\n")]);
    let modified = locale_dir(&[("en.json", r#"{"menu": {"open": "Open", "close": "Close"}}"#)]);
    let options = CompareOptions {
        modified_locale: Some("en".to_string()),
        ..Default::default()
    };

    let reports =
        compare_sources(&FsSource::new(origin.path()), &FsSource::new(modified.path()), &options)
            .unwrap();

    assert_eq!(reports.len(), 1);
    let diff = reports[0].outcome.as_ref().unwrap();
    assert_eq!(
        diff.added.get(&KeyPath::parse("menu.close")),
        Some(&Scalar::from("Close"))
    );
    assert!(diff.modified.is_empty());
}

#[test]
fn test_broken_locale_does_not_affect_others() {
    let origin = locale_dir(&[("en.json", r#"{"a": "A"}"#), ("fr.json", r#"{"a": "A"}"#)]);
    let modified = locale_dir(&[("en.json", "not json"), ("fr.json", r#"{"a": "B"}"#)]);
    let options = CompareOptions {
        all_locales: true,
        ..Default::default()
    };

    let reports =
        compare_sources(&FsSource::new(origin.path()), &FsSource::new(modified.path()), &options)
            .unwrap();

    assert_eq!(reports.len(), 2);
    assert!(matches!(reports[0].outcome, Err(CompareError::Parse(_))));
    assert!(reports[1].has_changes());
}
