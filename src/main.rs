//! locale-diff command-line interface.
//!
//! Loads locale documents from two checked-out revisions (a locale file or a
//! directory of them), compares them key by key and prints the translations
//! that were added or changed.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use locale_diff::{
    compare_sources, format_reports, CompareOptions, DiffConfig, FilterConfig, FsSource, KeyPath,
    LocaleDiffError, OutputFormat, OutputOptions, RemovalPolicy, SourceSelector,
};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// locale-diff - find translation keys that changed between two revisions
///
/// ORIGIN and MODIFIED are locale files or directories of `<locale>.json`
/// (or .yaml/.yml/.toml) files. Append `:LOCALE` to pick a locale from a
/// directory, e.g. `develop/locales:en`.
#[derive(Parser)]
#[command(name = "locale-diff")]
#[command(version)]
#[command(about = "Compare localization files between two revisions", long_about = None)]
struct Cli {
    /// Origin revision: locale file or directory, optionally PATH:LOCALE
    #[arg(value_name = "ORIGIN")]
    origin: String,

    /// Modified revision: locale file or directory, optionally PATH:LOCALE
    #[arg(value_name = "MODIFIED")]
    modified: String,

    /// Locale to compare (also used for the origin unless --origin-locale is set)
    #[arg(short, long)]
    locale: Option<String>,

    /// Locale to read from the origin revision
    #[arg(long)]
    origin_locale: Option<String>,

    /// Compare every locale found in either revision
    #[arg(short, long, conflicts_with_all = ["locale", "origin_locale"])]
    all: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// Print one `key.path: value` line per key instead of nested documents
    #[arg(long)]
    flat: bool,

    /// Maximum length for displayed values in flat mode
    #[arg(long, default_value = "80")]
    max_value_length: usize,

    /// Compare only the keys beneath this path (e.g. "menu.file")
    #[arg(long, value_name = "KEY.PATH")]
    scope: Option<String>,

    /// Report keys missing from the modified revision as removed instead of added
    #[arg(long)]
    separate_removals: bool,

    /// Ignore keys matching a pattern (e.g. "debug.**"); repeatable
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Only report keys matching a pattern (e.g. "menu.*"); repeatable
    #[arg(long, value_name = "PATTERN")]
    only: Vec<String>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only show changes, suppress summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn compare_options(
    cli: &Cli,
    origin: &SourceSelector,
    modified: &SourceSelector,
) -> Result<CompareOptions, LocaleDiffError> {
    let has_selector_locale = origin.locale.is_some() || modified.locale.is_some();
    if cli.all && has_selector_locale {
        return Err(LocaleDiffError::ConfigError {
            message: "--all cannot be combined with PATH:LOCALE arguments".to_string(),
        });
    }

    let filter = cli
        .ignore
        .iter()
        .fold(FilterConfig::new(), |config, pattern| config.ignore(pattern));
    let filter = cli
        .only
        .iter()
        .fold(filter, |config, pattern| config.only(pattern));

    let removals = if cli.separate_removals {
        RemovalPolicy::Separate
    } else {
        RemovalPolicy::Pooled
    };

    Ok(CompareOptions {
        modified_locale: modified.locale.clone().or_else(|| cli.locale.clone()),
        origin_locale: origin.locale.clone().or_else(|| cli.origin_locale.clone()),
        all_locales: cli.all,
        scope: cli.scope.as_deref().map(KeyPath::parse),
        diff: DiffConfig { removals },
        filter,
    })
}

fn run(cli: Cli) -> Result<i32> {
    let origin_selector = SourceSelector::parse(&cli.origin);
    let modified_selector = SourceSelector::parse(&cli.modified);
    let options = compare_options(&cli, &origin_selector, &modified_selector)?;

    let origin = FsSource::new(&origin_selector.path);
    let modified = FsSource::new(&modified_selector.path);
    debug!(origin = %origin_selector.path.display(), modified = %modified_selector.path.display(), "comparing revisions");

    let reports = compare_sources(&origin, &modified, &options)
        .context("Failed to load locale documents")?;

    let output_options = OutputOptions {
        flat: cli.flat,
        max_value_length: cli.max_value_length,
    };

    let output_format: OutputFormat = cli.format.into();
    let output = format_reports(&reports, &output_format, &output_options)
        .context("Failed to format diff output")?;

    if !cli.quiet {
        println!("{}", output);
    } else {
        for line in output.lines() {
            if !line.starts_with("Summary:") && !line.trim().is_empty() {
                println!("{}", line);
            }
        }
    }

    if reports.iter().any(|report| report.is_failure()) {
        Ok(2)
    } else if reports.iter().any(|report| report.has_changes()) {
        Ok(1)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Terminal),
            OutputFormat::Terminal
        );
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Json),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Plain),
            OutputFormat::Plain
        );
    }

    #[test]
    fn test_selector_locale_wins_over_flag() {
        let cli = Cli::parse_from(["locale-diff", "develop:fr", "feature", "--locale", "de"]);
        let origin = SourceSelector::parse(&cli.origin);
        let modified = SourceSelector::parse(&cli.modified);

        let options = compare_options(&cli, &origin, &modified).unwrap();
        assert_eq!(options.origin_locale.as_deref(), Some("fr"));
        assert_eq!(options.modified_locale.as_deref(), Some("de"));
    }

    #[test]
    fn test_scope_is_parsed_as_key_path() {
        let cli = Cli::parse_from(["locale-diff", "develop", "feature", "--scope", "menu.file"]);
        let origin = SourceSelector::parse(&cli.origin);
        let modified = SourceSelector::parse(&cli.modified);

        let options = compare_options(&cli, &origin, &modified).unwrap();
        assert_eq!(options.scope, Some(KeyPath::parse("menu.file")));
    }

    #[test]
    fn test_all_rejects_selector_locale() {
        let cli = Cli::parse_from(["locale-diff", "develop:fr", "feature", "--all"]);
        let origin = SourceSelector::parse(&cli.origin);
        let modified = SourceSelector::parse(&cli.modified);

        assert!(compare_options(&cli, &origin, &modified).is_err());
    }
}
