//! Error types for documentation requests

use thiserror::Error;

/// Errors that can occur while requesting documentation from the model
#[derive(Error, Debug)]
pub enum RequestError {
    /// No API key was configured
    #[error("Gemini API key is required. Use --api-key or set GEMINI_API_KEY")]
    MissingApiKey,

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the request for exceeding its quota
    #[error("Too many requests, retry after {retry_after}")]
    RateLimited { retry_after: String },

    /// Server returned an error
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// No usable documentation after every attempt
    #[error("Cannot get documentation after {attempts} attempt(s), please try again")]
    NoDocumentation { attempts: usize },
}

impl RequestError {
    /// Failures that end the request loop at once.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RequestError::MissingApiKey | RequestError::RateLimited { .. })
    }
}

/// Result type for documentation requests
pub type Result<T> = std::result::Result<T, RequestError>;
