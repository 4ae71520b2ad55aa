// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

pub mod client;

use std::fmt;

use itertools::Itertools;
use log::{error, info};

use crate::annot::client::AnnotationSource;
use crate::errors::LookupError;

pub const DEFAULT_KEYWORDS: [&str; 3] = [
    "transcription factor",
    "transcription activator",
    "transcription repressor",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Tf,
    Ntf,
    LookupFailed,
}

impl Classification {
    /// Report label, if the record belongs in the report at all.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Classification::Tf => Some("TF"),
            Classification::Ntf => Some("NTF"),
            Classification::LookupFailed => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().unwrap_or("lookup failed"))
    }
}

/// Phrases whose presence in a function annotation marks a transcription factor. Stored
/// lower-cased, in the order they were given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keywords(Vec<String>);

impl Keywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Keywords(
            keywords
                .into_iter()
                .map(|kw| kw.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// First keyword (in the given order) contained in `text`, ignoring case.
    pub fn matches(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.0
            .iter()
            .find(|kw| text.contains(kw.as_str()))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords::new(DEFAULT_KEYWORDS)
    }
}

impl fmt::Display for Keywords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().map(|kw| format!("'{}'", kw)).join(", "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedLookup {
    pub id: String,
    pub reason: LookupError,
}

impl fmt::Display for FailedLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.reason)
    }
}

/// Ids whose lookup failed, in the order the failures happened. Never deduplicated.
#[derive(Clone, Debug, Default)]
pub struct Failures {
    entries: Vec<FailedLookup>,
}

impl Failures {
    pub fn new() -> Self {
        Failures::default()
    }

    pub fn record(&mut self, id: &str, reason: LookupError) {
        self.entries.push(FailedLookup {
            id: String::from(id),
            reason,
        });
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|f| f.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FailedLookup> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Looks up the function annotation of `id` and classifies it. Lookup failures are logged and
/// recorded in `failures`; they never propagate.
pub fn classify<S: AnnotationSource + ?Sized>(
    source: &S,
    id: &str,
    keywords: &Keywords,
    failures: &mut Failures,
) -> Classification {
    info!("Getting function content of {}", id);
    let text = match source.fetch_function_text(id) {
        Ok(text) => text,
        Err(e) => {
            match e {
                LookupError::Extraction(_) => {
                    error!("Failed to get function content of {}: {}", id, e)
                }
                _ => error!("Failed to connect to {}: {}", id, e),
            }
            failures.record(id, e);
            return Classification::LookupFailed;
        }
    };

    match keywords.matches(&text) {
        Some(kw) => {
            info!("Found keyword '{}' in function content of {}", kw, id);
            Classification::Tf
        }
        None => {
            info!("No keyword found in function content of {}", id);
            Classification::Ntf
        }
    }
}
