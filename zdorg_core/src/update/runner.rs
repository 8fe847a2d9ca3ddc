//! Sequential update loop

use super::result::{ResultIdGenerator, UpdateResult};
use crate::api::OrganizationApi;
use crate::csv_import::OrganizationId;
use crate::error::{AuthError, Result};
use crate::payload::UpdatePayload;
use log::{debug, info, warn};

/// Send `payload` to every organization in `ids`, in order.
///
/// Requests are issued one at a time. Application and transport failures are
/// recorded on the organization's result and the loop moves on. The returned
/// results line up one-to-one with `ids`.
pub async fn run(
    client: &dyn OrganizationApi,
    payload: &UpdatePayload,
    ids: &[OrganizationId],
    id_generator: &ResultIdGenerator,
) -> Vec<UpdateResult> {
    let mut results = Vec::with_capacity(ids.len());

    for (index, organization_id) in ids.iter().enumerate() {
        debug!(
            "Updating organization {organization_id} ({}/{})",
            index + 1,
            ids.len()
        );
        let result_id = id_generator.next_id(organization_id);

        let result = match client.update_organization(organization_id, payload).await {
            Ok(response) => match response.application_error() {
                Some(error) => {
                    warn!("Organization {organization_id} rejected: {error}");
                    UpdateResult::failed(result_id, organization_id, error.message())
                }
                None => UpdateResult::succeeded(
                    result_id,
                    organization_id,
                    payload.field_names().to_vec(),
                ),
            },
            Err(error) => {
                warn!("Organization {organization_id} failed: {error}");
                UpdateResult::failed(result_id, organization_id, error.to_string())
            }
        };
        results.push(result);
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    info!(
        "Run finished: {succeeded} of {} organizations updated",
        results.len()
    );
    results
}

/// Verify credentials, then run the update.
///
/// A failed verification aborts with [`AuthError`] before any update is sent.
pub async fn submit(
    client: &dyn OrganizationApi,
    subdomain: &str,
    payload: &UpdatePayload,
    ids: &[OrganizationId],
    id_generator: &ResultIdGenerator,
) -> Result<Vec<UpdateResult>> {
    if !client.verify_credentials().await {
        return Err(AuthError::invalid_credentials(subdomain).into());
    }
    debug!("Credentials verified for {subdomain}");

    Ok(run(client, payload, ids, id_generator).await)
}
