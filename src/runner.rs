// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use itertools::Itertools;
use log::{info, warn};

use crate::annot::client::{AnnotationSource, HttpAnnotationClient};
use crate::annot::{classify, Classification, Failures, Keywords};
use crate::config::{
    find_tfclass_config, Settings, TfConfig, DEFAULT_FAILED, DEFAULT_INPUT, DEFAULT_OUTPUT,
};
use crate::errors::TfError;
use crate::logging;
use crate::report::{write_failures, ReportWriter, WriteMode};
use crate::seq::fasta::read_fasta_file;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    /// FastA file with UniProt headers ('>sp|ACCESSION|...')
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// CSV report of classified records
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// List of ids whose lookup failed (overwritten)
    #[arg(short, long, default_value = DEFAULT_FAILED)]
    failed: PathBuf,

    /// Log file (appended to); default: input file with a .log extension
    #[arg(short, long = "log-file")]
    log_file: Option<PathBuf>,

    /// Keyword marking a transcription factor (repeatable; replaces the defaults)
    #[arg(short = 'k', long = "keyword")]
    keywords: Vec<String>,

    /// UniProtKB REST endpoint; entries are fetched from <URL>/<ID>.json
    #[arg(long = "base-url")]
    base_url: Option<String>,

    /// Request timeout [s]; 0 waits forever
    #[arg(long)]
    timeout: Option<u64>,

    /// Append to the report instead of overwriting it (a header row is added on each run)
    #[arg(long)]
    append: bool,

    /// JSON config file; default: ./.tfclassconfig or ~/.tfclassconfig
    #[arg(short, long)]
    config: Option<PathBuf>,
}

// Precedence: command line, then config file, then built-in defaults.
fn resolve_settings(cli: Cli, config: Option<TfConfig>) -> Settings {
    let mut settings = Settings::for_input(&cli.input);
    if let Some(config) = config {
        settings.apply_config(config);
    }
    settings.output = cli.output;
    settings.failed = cli.failed;
    if let Some(log_file) = cli.log_file {
        settings.log_file = log_file;
    }
    if !cli.keywords.is_empty() {
        settings.keywords = Keywords::new(cli.keywords);
    }
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(secs) = cli.timeout {
        settings.timeout = Duration::from_secs(secs);
    }
    if cli.append {
        settings.mode = WriteMode::Append;
    }
    settings
}

// Settings that are valid but almost certainly not what the user meant.
fn settings_warnings(settings: &Settings) -> Vec<String> {
    let mut warnings = Vec::new();
    if settings.keywords.is_empty() {
        warnings.push(String::from(
            "Keyword list is empty: every record will be classified NTF",
        ));
    }
    warnings
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub tf: usize,
    pub ntf: usize,
    pub failed: usize,
}

/// Reads the input, classifies every record through `source`, and writes the report and the
/// failure list. A malformed header aborts before any output is written.
pub fn classify_file<S: AnnotationSource + ?Sized>(
    settings: &Settings,
    source: &S,
) -> Result<RunSummary, TfError> {
    let entries = read_fasta_file(&settings.input)?;
    info!(
        "Read {} records from {}",
        entries.len(),
        settings.input.display()
    );

    let mut failures = Failures::new();
    let mut summary = RunSummary {
        records: entries.len(),
        ..Default::default()
    };
    let mut report = ReportWriter::create(&settings.output, settings.mode)?;
    for entry in &entries {
        let classification = classify(source, &entry.id, &settings.keywords, &mut failures);
        match classification {
            Classification::Tf => summary.tf += 1,
            Classification::Ntf => summary.ntf += 1,
            Classification::LookupFailed => summary.failed += 1,
        }
        report.write_row(entry, classification)?;
    }
    report.finish()?;

    if !failures.is_empty() {
        info!("Failed lookups: {}", failures.iter().join("; "));
    }
    write_failures(&failures, &settings.failed)?;
    Ok(summary)
}

pub fn run() -> Result<(), TfError> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(find_tfclass_config);
    let config = match config_path {
        Some(path) => Some(TfConfig::from_file(&path)?),
        None => None,
    };
    let settings = resolve_settings(cli, config);

    logging::init(&settings.log_file)?;
    info!("Starting log");
    info!("Keywords: {}", settings.keywords);
    for msg in settings_warnings(&settings) {
        warn!("{}", msg);
    }
    if settings.timeout.is_zero() {
        info!("No request timeout");
    } else {
        info!("Request timeout: {}s", settings.timeout.as_secs());
    }

    let client = HttpAnnotationClient::new(&settings.base_url, settings.timeout)?;
    let summary = classify_file(&settings, &client)?;

    info!(
        "Classified {} records: {} TF, {} NTF, {} failed",
        summary.records, summary.tf, summary.ntf, summary.failed
    );
    info!(
        "Report: {}; failed ids: {}",
        settings.output.display(),
        settings.failed.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annot::client::DEFAULT_BASE_URL;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tfclass").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = resolve_settings(parse(&[]), None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_resolve_flags_override_config() {
        let config = TfConfig {
            keywords: Some(vec![String::from("homeobox")]),
            base_url: Some(String::from("http://mirror/uniprotkb")),
            timeout_secs: Some(10),
        };
        let cli = parse(&[
            "in.fa",
            "-k",
            "Zinc Finger",
            "--keyword",
            "bZIP",
            "--timeout",
            "0",
            "--append",
            "-o",
            "out.csv",
        ]);
        let settings = resolve_settings(cli, Some(config));
        assert_eq!(settings.input, PathBuf::from("in.fa"));
        assert_eq!(settings.log_file, PathBuf::from("in.log"));
        assert_eq!(settings.output, PathBuf::from("out.csv"));
        assert_eq!(settings.keywords, Keywords::new(["zinc finger", "bzip"]));
        // Not given on the command line: config file wins over the default
        assert_eq!(settings.base_url, "http://mirror/uniprotkb");
        assert_eq!(settings.timeout, Duration::ZERO);
        assert_eq!(settings.mode, WriteMode::Append);
    }

    #[test]
    fn test_resolve_config_over_defaults() {
        let config = TfConfig {
            keywords: None,
            base_url: None,
            timeout_secs: Some(3),
        };
        let settings = resolve_settings(parse(&["-l", "run.log"]), Some(config));
        assert_eq!(settings.keywords, Keywords::default());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.log_file, PathBuf::from("run.log"));
    }

    #[test]
    fn test_empty_keywords_warned() {
        let config = TfConfig::from_value(&serde_json::json!({ "keywords": [] })).unwrap();
        let settings = resolve_settings(parse(&[]), Some(config));
        assert!(settings.keywords.is_empty());
        let warnings = settings_warnings(&settings);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("empty"));

        // Keywords from the command line replace the empty list
        let config = TfConfig::from_value(&serde_json::json!({ "keywords": [] })).unwrap();
        let settings = resolve_settings(parse(&["-k", "homeobox"]), Some(config));
        assert!(settings_warnings(&settings).is_empty());
        assert!(settings_warnings(&Settings::default()).is_empty());
    }

    #[test]
    fn test_cli_rejects_bad_timeout() {
        assert!(Cli::try_parse_from(["tfclass", "--timeout", "soon"]).is_err());
    }
}
