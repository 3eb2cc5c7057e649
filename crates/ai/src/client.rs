//! Gemini `generateContent` client and the retrying documentation request.

use std::time::Duration;

use docgen_core::{DocMap, DocgenConfig, SymbolTable};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{RequestError, Result};
use crate::prompt::request_body;
use crate::response::{is_complete, parse_response};

/// Anything that turns a request body into response text.
pub trait Completion {
    fn complete(&self, body: &Value) -> Result<String>;
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// `{url}{model}:generateContent`
    endpoint: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client for the configured endpoint and model.
    pub fn new(config: &DocgenConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RequestError::MissingApiKey);
        }
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;
        Ok(Self { endpoint: endpoint(&config.url, &config.model), api_key, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint(url: &str, model: &str) -> String {
    format!("{}/{model}:generateContent", url.trim_end_matches('/'))
}

impl Completion for GeminiClient {
    fn complete(&self, body: &Value) -> Result<String> {
        debug!(endpoint = self.endpoint.as_str(), "Sending generateContent request");
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let payload: Value = response.json().unwrap_or(Value::Null);
            return Err(RequestError::RateLimited { retry_after: retry_delay(&payload) });
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RequestError::Status { status: status.as_u16(), message });
        }
        candidate_text(&response.json()?)
    }
}

/// `retryDelay` of the last error detail, as the service words it.
fn retry_delay(payload: &Value) -> String {
    payload["error"]["details"]
        .as_array()
        .and_then(|details| details.last())
        .and_then(|detail| detail["retryDelay"].as_str())
        .unwrap_or("a while")
        .to_string()
}

/// Text of the first candidate's first part.
fn candidate_text(payload: &Value) -> Result<String> {
    payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RequestError::Malformed("no candidate text in response".to_string()))
}

/// Requests documentation for a symbol table, retrying incomplete answers.
pub struct DocRequester<C> {
    completion: C,
    max_attempts: usize,
}

impl<C: Completion> DocRequester<C> {
    pub fn new(completion: C, max_attempts: usize) -> Self {
        Self { completion, max_attempts: max_attempts.max(1) }
    }

    /// Ask for documentation of every symbol in `table`.
    ///
    /// The first complete answer wins. Otherwise the answer covering the most
    /// symbols is returned once attempts run out. Rate limiting and a missing
    /// key end the loop at once.
    pub fn request_docs(&self, table: &SymbolTable) -> Result<DocMap> {
        if table.is_empty() {
            return Ok(DocMap::new());
        }
        let body = request_body(table);
        let mut best: Option<DocMap> = None;
        let mut last_error: Option<RequestError> = None;

        for attempt in 1..=self.max_attempts {
            let text = match self.completion.complete(&body) {
                Ok(text) => text,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(attempt, error = %e, "Documentation request failed");
                    last_error = Some(e);
                    continue;
                }
            };

            let docs = parse_response(&text, table);
            if is_complete(&docs, table) {
                info!(attempt, documented = docs.len(), "Received complete documentation");
                return Ok(docs);
            }
            warn!(attempt, documented = docs.len(), requested = table.len(), "Incomplete documentation");
            if best.as_ref().map_or(true, |b| docs.len() > b.len()) {
                best = Some(docs);
            }
        }

        match best {
            Some(docs) if !docs.is_empty() => {
                warn!(documented = docs.len(), requested = table.len(), "Using partial documentation");
                Ok(docs)
            }
            Some(_) => Err(RequestError::NoDocumentation { attempts: self.max_attempts }),
            None => Err(last_error.unwrap_or(RequestError::NoDocumentation { attempts: self.max_attempts })),
        }
    }
}
