//! Zendesk API error types

use thiserror::Error;

/// Credential verification failed; aborts a run before any update
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The API rejected the subdomain/token pair or could not be reached
    #[error("Invalid API credentials or subdomain: {subdomain}")]
    InvalidCredentials { subdomain: String },
}

impl AuthError {
    /// Create an invalid credentials error
    pub fn invalid_credentials(subdomain: &str) -> Self {
        Self::InvalidCredentials {
            subdomain: subdomain.to_string(),
        }
    }
}

/// A single request failed below the application level
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP client failure (connect, timeout, TLS, body read)
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The payload or response could not be (de)serialised
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other transport failure
    #[error("{message}")]
    Other { message: String },
}

impl TransportError {
    /// Create a generic transport error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

/// The server accepted the request shape but rejected the operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", self.message())]
pub struct ApplicationError {
    /// Error code returned by the server
    pub code: String,
    /// Human readable description, if the server sent one
    pub description: Option<String>,
}

impl ApplicationError {
    pub fn new(code: impl Into<String>, description: Option<String>) -> Self {
        Self {
            code: code.into(),
            description,
        }
    }

    /// The description, or the raw error code when there is none
    pub fn message(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => &self.code,
        }
    }
}
