// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::annot::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::annot::Keywords;
use crate::errors::TfError;
use crate::report::WriteMode;

pub const CONFIG_FILE_NAME: &str = ".tfclassconfig";

pub const DEFAULT_INPUT: &str = "CTCF.fasta";
pub const DEFAULT_OUTPUT: &str = "CTCF.csv";
pub const DEFAULT_FAILED: &str = "failed_ids.txt";

/// Optional settings read from a JSON config file. Anything left out falls back to the built-in
/// defaults; command-line flags override both.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TfConfig {
    pub keywords: Option<Vec<String>>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl TfConfig {
    pub fn from_value(value: &Value) -> Result<Self, TfError> {
        Ok(TfConfig::deserialize(value)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, TfError> {
        let text = fs::read_to_string(path)
            .map_err(|e| TfError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| TfError::Config(format!("{}: {}", path.display(), e)))?;
        TfConfig::from_value(&value)
            .map_err(|e| TfError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Looks for a config file in the current directory, then in the home directory.
pub fn find_tfclass_config() -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        let path = PathBuf::from(home).join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Everything a run needs, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub failed: PathBuf,
    pub log_file: PathBuf,
    pub keywords: Keywords,
    pub base_url: String,
    pub timeout: Duration,
    pub mode: WriteMode,
}

impl Settings {
    /// Settings for `input` with every other value at its default. The log file sits next to the
    /// input, with a `.log` extension.
    pub fn for_input<P: AsRef<Path>>(input: P) -> Self {
        let input = input.as_ref().to_path_buf();
        Settings {
            log_file: input.with_extension("log"),
            input,
            output: PathBuf::from(DEFAULT_OUTPUT),
            failed: PathBuf::from(DEFAULT_FAILED),
            keywords: Keywords::default(),
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
            mode: WriteMode::default(),
        }
    }

    pub fn apply_config(&mut self, config: TfConfig) {
        if let Some(keywords) = config.keywords {
            self.keywords = Keywords::new(keywords);
        }
        if let Some(base_url) = config.base_url {
            self.base_url = base_url;
        }
        if let Some(secs) = config.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::for_input(DEFAULT_INPUT)
    }
}
