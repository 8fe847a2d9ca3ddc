//! Update payload construction
//!
//! Turns the operator's field rows into the body of an organization update
//! request:
//!
//! ```json
//! { "organization": { "name": "Acme", "organization_fields": { "region": "EU" } } }
//! ```

use crate::fields::{CoercedValue, catalog, coerce};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of operator input
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldUpdate {
    /// Dotted field path (`name`, `organization_fields.department`)
    pub field: String,
    /// Raw textual value
    pub value: String,
}

impl FieldUpdate {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether this row carries both a field and a value
    pub fn is_filled(&self) -> bool {
        !self.field.is_empty() && !self.value.trim().is_empty()
    }
}

/// Body of an organization update request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UpdatePayload {
    pub organization: OrganizationAttributes,
    #[serde(skip)]
    submitted_fields: Vec<String>,
}

/// Attributes to set on an organization
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OrganizationAttributes {
    #[serde(flatten)]
    pub attributes: BTreeMap<String, CoercedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_fields: Option<BTreeMap<String, CoercedValue>>,
}

impl UpdatePayload {
    /// Field paths of the rows that made it into the payload, in input order
    pub fn field_names(&self) -> &[String] {
        &self.submitted_fields
    }

    pub fn is_empty(&self) -> bool {
        self.organization.attributes.is_empty() && self.organization.organization_fields.is_none()
    }
}

/// Build an update payload from operator rows.
///
/// Rows without a field name or value are skipped. A later row for the same
/// field overwrites an earlier one.
pub fn build(updates: &[FieldUpdate]) -> UpdatePayload {
    let mut payload = UpdatePayload::default();

    for update in updates.iter().filter(|u| u.is_filled()) {
        let value = coerce(&update.field, &update.value);

        if let Some(key) = catalog::custom_key(&update.field) {
            payload
                .organization
                .organization_fields
                .get_or_insert_with(BTreeMap::new)
                .insert(key.to_string(), value);
        } else if update.field == "organization_fields" {
            warn!("Ignoring bare 'organization_fields' row; use organization_fields.<key>");
            continue;
        } else {
            payload
                .organization
                .attributes
                .insert(update.field.clone(), value);
        }

        if catalog::find(&update.field).is_none() {
            warn!("Field '{}' is not in the catalog", update.field);
        }
        payload.submitted_fields.push(update.field.clone());
    }

    payload
}
