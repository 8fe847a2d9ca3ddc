//! Mock implementation of OrganizationApi for testing

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zdorg_core::api::{ApiResponse, OrganizationApi};
use zdorg_core::error::TransportError;
use zdorg_core::payload::UpdatePayload;

/// Mock implementation of OrganizationApi for testing
///
/// Every organization succeeds unless scripted otherwise. Calls are recorded
/// so tests can assert on what was sent and in which order.
///
/// # Examples
///
/// ```rust,no_run
/// use zdorg_test_utils::MockOrganizationApi;
///
/// let mock = MockOrganizationApi::new();
/// mock.expect_transport_error("2", "connection reset");
/// mock.expect_application_error("3", "RecordInvalid", Some("Name: is too long"));
/// ```
#[derive(Clone, Default)]
pub struct MockOrganizationApi {
    state: Arc<Mutex<MockState>>,
}

/// Scripted response for one organization
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Success,
    ApplicationError {
        code: String,
        description: Option<String>,
    },
    TransportError(String),
}

/// One `update_organization` call seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub organization_id: String,
    pub body: serde_json::Value,
}

#[derive(Debug, Default)]
struct MockState {
    credentials_rejected: bool,
    outcomes: HashMap<String, MockOutcome>,
    delay: Option<Duration>,
    verify_calls: usize,
    calls: Vec<RecordedCall>,
}

impl MockOrganizationApi {
    /// Create a new mock where credentials are valid and every update succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Make credential verification fail
    pub fn reject_credentials(&self) {
        self.state.lock().unwrap().credentials_rejected = true;
    }

    /// Script the outcome for one organization
    pub fn expect_outcome(&self, organization_id: &str, outcome: MockOutcome) {
        self.state
            .lock()
            .unwrap()
            .outcomes
            .insert(organization_id.to_string(), outcome);
    }

    /// Make the update of `organization_id` fail at the transport level
    pub fn expect_transport_error(&self, organization_id: &str, message: &str) {
        self.expect_outcome(
            organization_id,
            MockOutcome::TransportError(message.to_string()),
        );
    }

    /// Make the server reject the update of `organization_id`
    pub fn expect_application_error(
        &self,
        organization_id: &str,
        code: &str,
        description: Option<&str>,
    ) {
        self.expect_outcome(
            organization_id,
            MockOutcome::ApplicationError {
                code: code.to_string(),
                description: description.map(str::to_string),
            },
        );
    }

    /// Delay every update call, to keep a run in flight
    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().delay = Some(delay);
        self
    }

    /// Update calls received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Organization IDs of the update calls received so far
    pub fn called_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.organization_id)
            .collect()
    }

    /// Number of credential checks received so far
    pub fn verify_calls(&self) -> usize {
        self.state.lock().unwrap().verify_calls
    }
}

#[async_trait]
impl OrganizationApi for MockOrganizationApi {
    async fn verify_credentials(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.verify_calls += 1;
        !state.credentials_rejected
    }

    async fn update_organization(
        &self,
        organization_id: &str,
        payload: &UpdatePayload,
    ) -> Result<ApiResponse, TransportError> {
        let (outcome, delay) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(RecordedCall {
                organization_id: organization_id.to_string(),
                body: serde_json::to_value(payload)?,
            });
            (
                state
                    .outcomes
                    .get(organization_id)
                    .cloned()
                    .unwrap_or(MockOutcome::Success),
                state.delay,
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match outcome {
            MockOutcome::Success => Ok(ApiResponse::success(
                json!({ "id": organization_id }),
            )),
            MockOutcome::ApplicationError { code, description } => {
                Ok(ApiResponse::failure(code, description))
            }
            MockOutcome::TransportError(message) => Err(TransportError::other(message)),
        }
    }
}
