//! HTTP client for the Zendesk organizations API

use super::OrganizationApi;
use super::types::{ApiResponse, DEFAULT_ERROR_CODE};
use crate::error::{Result, TransportError, ValidationError};
use crate::payload::UpdatePayload;
use crate::ClientConfig;
use async_trait::async_trait;
use log::{debug, trace, warn};
use reqwest::{Client, Url};
use std::time::Duration;

/// Zendesk REST API client
///
/// Requests authenticate with HTTP Basic auth using `{login}/token` as the
/// user name and the API token as the password.
pub struct ZendeskClient {
    http: Client,
    base_url: Url,
    login: String,
    api_token: String,
}

impl std::fmt::Debug for ZendeskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZendeskClient")
            .field("base_url", &self.base_url.as_str())
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

impl ZendeskClient {
    /// Create a client from configuration.
    ///
    /// Fails when the subdomain or API token is missing or the base URL is invalid.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let subdomain = config
            .subdomain
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::missing_field("subdomain"))?;
        let api_token = config
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::missing_field("api_token"))?;

        let base = config
            .base_url
            .clone()
            .unwrap_or_else(|| config.environment.base_url(subdomain));
        let base_url = Url::parse(&base).map_err(|e| {
            ValidationError::invalid_parameter("base_url", &format!("{base}: {e}"))
        })?;

        let login = config
            .email
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(subdomain)
            .to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(TransportError::from)?;

        debug!(
            "Created Zendesk client for {} ({})",
            base_url, config.environment
        );

        Ok(Self {
            http,
            base_url,
            login,
            api_token: api_token.to_string(),
        })
    }

    /// Base URL all requests are made against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::other(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn user(&self) -> String {
        format!("{}/token", self.login)
    }
}

#[async_trait]
impl OrganizationApi for ZendeskClient {
    async fn verify_credentials(&self) -> bool {
        let mut url = match self.endpoint(&["organizations.json"]) {
            Ok(url) => url,
            Err(e) => {
                warn!("Credential check failed: {e}");
                return false;
            }
        };
        url.query_pairs_mut().append_pair("per_page", "1");

        debug!("Verifying credentials against {url}");
        match self
            .http
            .get(url)
            .basic_auth(self.user(), Some(&self.api_token))
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                debug!("Credential check returned {status}");
                status.is_success()
            }
            Err(e) => {
                warn!("Credential check failed: {e}");
                false
            }
        }
    }

    async fn update_organization(
        &self,
        organization_id: &str,
        payload: &UpdatePayload,
    ) -> std::result::Result<ApiResponse, TransportError> {
        let resource = format!("{organization_id}.json");
        let url = self.endpoint(&["organizations", &resource])?;
        let body = serde_json::to_vec(payload)?;

        debug!("PUT {url}");
        trace!("Request body: {}", String::from_utf8_lossy(&body));

        let response = self
            .http
            .put(url)
            .basic_auth(self.user(), Some(&self.api_token))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        trace!("Response {status}: {text}");

        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        debug!("Update of organization {organization_id} rejected with {status}");
        let response = match serde_json::from_str::<ApiResponse>(&text) {
            Ok(mut rejected) => {
                if rejected
                    .error
                    .as_ref()
                    .is_none_or(|e| e.is_null() || e.as_str() == Some(""))
                {
                    rejected.error = Some(serde_json::Value::String(DEFAULT_ERROR_CODE.to_string()));
                }
                rejected
            }
            Err(_) => ApiResponse::failure(
                format!("HTTP {}", status.as_u16()),
                status.canonical_reason().map(str::to_string),
            ),
        };
        Ok(response)
    }
}
