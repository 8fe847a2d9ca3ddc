//! Per-organization outcomes of a bulk update

use crate::csv_import::OrganizationId;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Message recorded for every successful update
pub const SUCCESS_MESSAGE: &str = "Organization updated successfully";

/// Message recorded when a failure carries no description at all
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Outcome of updating one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// Unique within a run, even when the same organization is listed twice
    pub id: String,
    pub organization_id: OrganizationId,
    pub success: bool,
    pub message: String,
    /// Field paths that were sent; only present on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl UpdateResult {
    pub fn succeeded(id: String, organization_id: &str, fields: Vec<String>) -> Self {
        Self {
            id,
            organization_id: organization_id.to_string(),
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            fields: Some(fields),
        }
    }

    pub fn failed(id: String, organization_id: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            id,
            organization_id: organization_id.to_string(),
            success: false,
            message: if message.is_empty() {
                UNKNOWN_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            fields: None,
        }
    }
}

/// Generates result IDs of the form `{organization}-{unix millis}-{sequence}`.
///
/// The sequence makes IDs unique even when two results are created within the
/// same millisecond for the same organization.
#[derive(Debug, Default)]
pub struct ResultIdGenerator {
    sequence: AtomicU64,
}

impl ResultIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, organization_id: &str) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis();
        format!("{organization_id}-{millis}-{sequence}")
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_results(results: &[UpdateResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Updated {} organization(s). Failures: {}",
            self.succeeded, self.failed
        )
    }
}

/// Results of the most recent run.
///
/// A new run replaces the previous results wholesale.
#[derive(Debug, Clone, Default)]
pub struct UpdateResults {
    results: Vec<UpdateResult>,
}

impl UpdateResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, results: Vec<UpdateResult>) {
        self.results = results;
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    pub fn as_slice(&self) -> &[UpdateResult] {
        &self.results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(&self.results)
    }
}
