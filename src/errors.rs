// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{error, fmt, io};

#[derive(Debug)]
pub enum TfError {
    Io(io::Error),
    // Header lines need at least two '|'-separated fields; the id is the second one.
    MalformedHeader { line: usize, header: String },
    Config(String),
    Http(String),
}

// These allow conversion to TfError, required for main() to return Result<()> and for '?' to
// work.

impl From<io::Error> for TfError {
    fn from(e: io::Error) -> Self {
        TfError::Io(e)
    }
}

impl From<serde_json::Error> for TfError {
    fn from(e: serde_json::Error) -> Self {
        TfError::Config(e.to_string())
    }
}

impl fmt::Display for TfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfError::Io(e) => write!(f, "I/O error: {}", e),
            TfError::MalformedHeader { line, header } => write!(
                f,
                "Malformed FastA header at line {}: expected '>db|ID|...', got '{}'",
                line, header
            ),
            TfError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TfError::Http(msg) => write!(f, "HTTP client error: {}", msg),
        }
    }
}

impl error::Error for TfError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            TfError::Io(e) => Some(e),
            _ => None,
        }
    }
}

// Failure of a single annotation lookup. These never abort a run: the classifier logs them and
// records the id as failed.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    Status(u16),
    Network(String),
    Extraction(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Status(code) => write!(f, "server answered with HTTP status {}", code),
            LookupError::Network(msg) => write!(f, "request failed: {}", msg),
            LookupError::Extraction(msg) => write!(f, "no function text: {}", msg),
        }
    }
}

impl error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Network(e.to_string())
    }
}
