//! Zendesk Organization Updater Core Library
//!
//! This is the core library for bulk-updating Zendesk organizations, providing
//! value coercion, payload construction, CSV ID extraction, the HTTP client and
//! the sequential update loop.

pub mod api;
pub mod csv_import;
pub mod error;
pub mod fields;
pub mod form;
pub mod payload;
pub mod update;

// Mock implementations and test builders live in the zdorg-test-utils crate

// Re-export main types
pub use api::{ApiResponse, Environment, OrganizationApi, ZendeskClient};
pub use csv_import::OrganizationId;
pub use error::{Error, Result};
pub use fields::{CoercedValue, FIELD_OPTIONS, FieldOption, coerce};
pub use form::{DataSource, UpdateForm};
pub use payload::{FieldUpdate, UpdatePayload};
pub use update::{ResultIdGenerator, RunSummary, UpdateResult, UpdateResults};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Core client configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ClientConfig {
    pub subdomain: Option<String>,
    /// Login used for token auth; the subdomain is used when unset
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub environment: Environment,
    /// Overrides the environment's base URL
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            subdomain: None,
            email: None,
            api_token: None,
            environment: Environment::default(),
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    pub fn new(subdomain: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            subdomain: Some(subdomain.into()),
            api_token: Some(api_token.into()),
            ..Default::default()
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            subdomain: Some("testsubdomain".to_string()),
            email: None,
            api_token: Some("testtoken".to_string()),
            environment: Environment::Sandbox,
            base_url: None,
            timeout_seconds: 5, // short timeout for faster tests
        }
    }
}
