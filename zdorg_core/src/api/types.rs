//! API request/response types

use crate::error::ApplicationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Error code used when the server rejects an update without naming the error
pub const DEFAULT_ERROR_CODE: &str = "Failed to update organization";

/// Which Zendesk host receives requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Sandbox,
}

impl Environment {
    /// API base URL for a subdomain in this environment
    pub fn base_url(self, subdomain: &str) -> String {
        match self {
            Self::Production => format!("https://{subdomain}.zendesk.com/api/v2"),
            Self::Sandbox => format!("https://{subdomain}.sandbox.zendesk.com/api/v2"),
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(format!(
                "Unknown environment '{other}', expected 'production' or 'sandbox'"
            )),
        }
    }
}

/// Response envelope of an organization update.
///
/// Successful responses carry `organization`; rejected ones carry `error` and
/// optionally `description` and `details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiResponse {
    /// A successful envelope around the updated organization
    pub fn success(organization: Value) -> Self {
        Self {
            organization: Some(organization),
            ..Default::default()
        }
    }

    /// A rejection envelope
    pub fn failure(error: impl Into<String>, description: Option<String>) -> Self {
        Self {
            error: Some(Value::String(error.into())),
            description,
            ..Default::default()
        }
    }

    /// The application error carried by this response, if any
    pub fn application_error(&self) -> Option<ApplicationError> {
        let error = self
            .error
            .as_ref()
            .filter(|e| !e.is_null() && e.as_str() != Some(""))?;

        let (code, nested_message) = match error {
            Value::String(code) => (code.clone(), None),
            Value::Object(map) => {
                let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                let message = text("message");
                let code = text("title")
                    .or_else(|| message.clone())
                    .unwrap_or_else(|| DEFAULT_ERROR_CODE.to_string());
                (code, message)
            }
            other => (other.to_string(), None),
        };

        let description = self
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .or(nested_message);

        Some(ApplicationError::new(code, description))
    }

    pub fn is_success(&self) -> bool {
        self.application_error().is_none()
    }
}
