//! Update command orchestrator
//!
//! Drives one submission end to end: form validation, credential check, the
//! sequential update run, and presentation of the results. The orchestrator
//! owns the result collection of the most recent run and refuses a second
//! submission while one is in flight.

use crate::error::CliError;
use crate::output::{OutputFormat, create_formatter};
use anyhow::Result;
use colored::*;
use log::{debug, info};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use zdorg_core::error::ValidationError;
use zdorg_core::update::{self, ResultIdGenerator, RunSummary, UpdateResult, UpdateResults};
use zdorg_core::{ClientConfig, OrganizationApi, UpdateForm, ZendeskClient, payload};

/// Orchestrator for the update command
pub struct UpdateOrchestrator {
    client: Arc<dyn OrganizationApi>,
    in_flight: AtomicBool,
    results: Mutex<UpdateResults>,
    id_generator: ResultIdGenerator,
}

/// Clears the in-flight flag when a submission ends, however it ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl UpdateOrchestrator {
    /// Create an orchestrator around an existing API client
    pub fn new(client: Arc<dyn OrganizationApi>) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
            results: Mutex::new(UpdateResults::new()),
            id_generator: ResultIdGenerator::new(),
        }
    }

    /// Create an orchestrator talking to Zendesk
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = ZendeskClient::new(config)?;
        debug!("Update orchestrator using {}", client.base_url());
        Ok(Self::new(Arc::new(client)))
    }

    /// Check the API credentials without updating anything
    pub async fn verify(&self) -> bool {
        self.client.verify_credentials().await
    }

    /// Validate and run one submission.
    ///
    /// Validation and authentication failures abort before any organization
    /// is touched and leave the previous results in place. Otherwise the new
    /// results replace the previous run's.
    pub async fn submit(&self, form: &UpdateForm) -> Result<Vec<UpdateResult>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(zdorg_core::Error::from(ValidationError::SubmissionInProgress).into());
        }
        let _guard = InFlightGuard(&self.in_flight);

        form.validate().map_err(zdorg_core::Error::from)?;

        let payload = payload::build(&form.filled_updates());
        let ids = form.target_ids();
        info!(
            "Updating {} organization(s) in {} with fields: {}",
            ids.len(),
            form.environment,
            payload.field_names().join(", ")
        );

        let results = update::submit(
            self.client.as_ref(),
            form.subdomain.trim(),
            &payload,
            &ids,
            &self.id_generator,
        )
        .await?;

        self.lock_results().replace(results.clone());
        Ok(results)
    }

    /// Whether a submission is currently running
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Results of the most recent run
    pub fn results(&self) -> Vec<UpdateResult> {
        self.lock_results().as_slice().to_vec()
    }

    pub fn summary(&self) -> RunSummary {
        self.lock_results().summary()
    }

    pub fn clear_results(&self) {
        self.lock_results().clear();
    }

    /// Render the most recent results in the given format
    pub fn render(&self, format: OutputFormat, use_color: bool) -> Result<String> {
        let results = self.results();
        let mut output = create_formatter(format, use_color).format_batch(&results)?;

        if format == OutputFormat::Human {
            let summary = self.summary().to_string();
            let summary = match (use_color, self.summary().failed) {
                (false, _) => summary,
                (true, 0) => summary.green().to_string(),
                (true, _) => summary.yellow().to_string(),
            };
            if !output.is_empty() {
                output.push_str("\n\n");
            }
            output.push_str(&summary);
        }

        Ok(output)
    }

    /// Write the most recent results to a CSV file
    pub fn export(&self, path: &Path) -> Result<()> {
        let csv = update::to_csv(&self.results());
        std::fs::write(path, csv)
            .map_err(|e| CliError::from_io_error(e, &path.display().to_string()))?;
        info!("Exported results to {}", path.display());
        Ok(())
    }

    fn lock_results(&self) -> std::sync::MutexGuard<'_, UpdateResults> {
        // A poisoned lock still holds a complete result list
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
