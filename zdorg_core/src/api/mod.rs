//! Zendesk organization API
//!
//! This module provides:
//! - `OrganizationApi`: the capability the update runner depends on
//! - `ZendeskClient`: the HTTP implementation against the Zendesk REST API
//! - `types`: environment selection and response envelopes

pub mod client;
pub mod types;

pub use client::ZendeskClient;
pub use types::{ApiResponse, Environment};

use crate::error::TransportError;
use crate::payload::UpdatePayload;
use async_trait::async_trait;

/// Operations the updater needs from the Zendesk API
#[async_trait]
pub trait OrganizationApi: Send + Sync {
    /// Check that the configured credentials are accepted.
    ///
    /// Network and authentication failures both report `false`.
    async fn verify_credentials(&self) -> bool;

    /// Send one organization update.
    ///
    /// An application-level rejection is an `Ok` response carrying an error;
    /// `Err` is reserved for transport failures.
    async fn update_organization(
        &self,
        organization_id: &str,
        payload: &UpdatePayload,
    ) -> Result<ApiResponse, TransportError>;
}
