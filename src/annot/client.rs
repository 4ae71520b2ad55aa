// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::StatusCode;
use serde_json::Value;

use crate::errors::{LookupError, TfError};

pub const DEFAULT_BASE_URL: &str = "https://rest.uniprot.org/uniprotkb";

/// Default request timeout. The lookup is a single attempt, so this bounds how long one hung
/// connection can stall a run. A zero duration means no timeout at all.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Location of the free-text function annotation in a UniProtKB JSON entry.
const FUNCTION_TEXT_POINTER: &str = "/comments/0/texts/0/value";

/// Anything that can produce the function annotation text of an accession.
pub trait AnnotationSource {
    fn fetch_function_text(&self, id: &str) -> Result<String, LookupError>;
}

/// Pulls `comments[0].texts[0].value` out of a UniProtKB entry, lower-cased.
pub fn extract_function_text(entry: &Value) -> Result<String, LookupError> {
    entry
        .pointer(FUNCTION_TEXT_POINTER)
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .ok_or_else(|| {
            LookupError::Extraction(format!("no string at {} in entry", FUNCTION_TEXT_POINTER))
        })
}

pub fn parse_entry(body: &str) -> Result<String, LookupError> {
    let entry: Value = serde_json::from_str(body)
        .map_err(|e| LookupError::Extraction(format!("invalid JSON: {}", e)))?;
    extract_function_text(&entry)
}

/// Blocking client for the UniProtKB REST API: one GET to `<base_url>/<id>.json` per lookup.
pub struct HttpAnnotationClient {
    client: Client,
    base_url: String,
}

/// Zero means "no timeout". The blocking client otherwise falls back to its own 30 s default.
pub fn request_timeout(timeout: Duration) -> Option<Duration> {
    if timeout.is_zero() {
        None
    } else {
        Some(timeout)
    }
}

/// Client settings shared by every lookup: user agent and request timeout.
pub fn client_builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .user_agent(format!("tfclass/{}", env!("CARGO_PKG_VERSION")))
        .timeout(request_timeout(timeout))
}

impl HttpAnnotationClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TfError> {
        HttpAnnotationClient::from_builder(client_builder(timeout), base_url)
    }

    /// Finishes a builder from `client_builder`, e.g. after adding proxy settings.
    pub fn from_builder(builder: ClientBuilder, base_url: &str) -> Result<Self, TfError> {
        let client = builder.build().map_err(|e| TfError::Http(e.to_string()))?;
        Ok(HttpAnnotationClient::with_client(client, base_url))
    }

    /// Wraps an already configured `reqwest` client (proxies, TLS roots, ...).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        HttpAnnotationClient {
            client,
            base_url: String::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn entry_url(&self, id: &str) -> String {
        format!("{}/{}.json", self.base_url, id)
    }
}

impl AnnotationSource for HttpAnnotationClient {
    fn fetch_function_text(&self, id: &str) -> Result<String, LookupError> {
        let url = self.entry_url(id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::Status(status.as_u16()));
        }
        let body = response.text()?;
        parse_entry(&body)
    }
}
