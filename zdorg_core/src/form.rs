//! Update form state and pre-flight validation
//!
//! [`UpdateForm`] holds everything an operator enters for one submission.
//! [`UpdateForm::validate`] runs before any network activity; checks happen in
//! a fixed order and the first failure is reported.

use crate::api::Environment;
use crate::csv_import::OrganizationId;
use crate::error::ValidationError;
use crate::fields::catalog;
use crate::payload::FieldUpdate;

/// Most field rows a form accepts
pub const MAX_FIELD_ROWS: usize = 5;

/// Where the target organization IDs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A single organization ID typed by the operator
    Manual(String),
    /// IDs parsed from a CSV file
    Csv(Vec<OrganizationId>),
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Manual(String::new())
    }
}

/// Application state for one submission
#[derive(Debug, Clone, Default)]
pub struct UpdateForm {
    pub subdomain: String,
    pub api_token: String,
    pub environment: Environment,
    pub source: DataSource,
    pub fields: Vec<FieldUpdate>,
}

impl UpdateForm {
    pub fn new(subdomain: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FieldUpdate::new(field, value));
        self
    }

    /// Check the form is ready to submit.
    ///
    /// Order: subdomain, API token, organization IDs, field rows.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subdomain.trim().is_empty() {
            return Err(ValidationError::missing_field("subdomain"));
        }
        if self.api_token.trim().is_empty() {
            return Err(ValidationError::missing_field("api_token"));
        }

        match &self.source {
            DataSource::Manual(id) if id.trim().is_empty() => {
                return Err(ValidationError::missing_field("organization_id"));
            }
            DataSource::Csv(ids) if ids.is_empty() => {
                return Err(ValidationError::NoOrganizationIds);
            }
            _ => {}
        }

        if self.fields.len() > MAX_FIELD_ROWS {
            return Err(ValidationError::too_many_fields(
                MAX_FIELD_ROWS,
                self.fields.len(),
            ));
        }
        if !self.fields.iter().any(FieldUpdate::is_filled) {
            return Err(ValidationError::NoFieldsToUpdate);
        }

        Ok(())
    }

    /// Organization IDs this form targets, in order
    pub fn target_ids(&self) -> Vec<OrganizationId> {
        match &self.source {
            DataSource::Manual(id) => vec![id.trim().to_string()],
            DataSource::Csv(ids) => ids.clone(),
        }
    }

    /// Field rows that carry both a field and a value
    pub fn filled_updates(&self) -> Vec<FieldUpdate> {
        self.fields
            .iter()
            .filter(|u| u.is_filled())
            .cloned()
            .collect()
    }

    /// Clear the organization source and field rows, keeping credentials
    pub fn reset(&mut self) {
        self.source = DataSource::default();
        self.fields.clear();
    }
}

/// Parse a `KEY=VALUE` field argument.
///
/// Only the first `=` separates; the value may itself contain `=`. The key
/// must be a plain attribute name or `organization_fields.<key>`.
pub fn parse_field_argument(argument: &str) -> Result<FieldUpdate, ValidationError> {
    let (field, value) = argument.split_once('=').ok_or_else(|| {
        ValidationError::invalid_parameter("field", &format!("expected KEY=VALUE, got '{argument}'"))
    })?;

    let field = field.trim();
    if field.is_empty() {
        return Err(ValidationError::invalid_parameter(
            "field",
            &format!("missing field name in '{argument}'"),
        ));
    }
    if !catalog::is_well_formed(field) {
        return Err(ValidationError::invalid_parameter(
            "field",
            &format!("'{field}' is not a field name or organization_fields.<key>"),
        ));
    }

    Ok(FieldUpdate::new(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_form() -> UpdateForm {
        UpdateForm::new("acme", "token")
            .with_source(DataSource::Manual("123".into()))
            .with_field("name", "Acme")
    }

    #[test]
    fn test_ready_form_validates() {
        assert_eq!(ready_form().validate(), Ok(()));
    }

    #[test]
    fn test_validation_order() {
        let mut form = UpdateForm::default();
        assert_eq!(
            form.validate(),
            Err(ValidationError::missing_field("subdomain"))
        );

        form.subdomain = "acme".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::missing_field("api_token"))
        );

        form.api_token = "token".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::missing_field("organization_id"))
        );

        form.source = DataSource::Manual("1".into());
        assert_eq!(form.validate(), Err(ValidationError::NoFieldsToUpdate));
    }

    #[test]
    fn test_empty_csv_source_is_rejected() {
        let form = ready_form().with_source(DataSource::Csv(vec![]));
        assert_eq!(form.validate(), Err(ValidationError::NoOrganizationIds));
    }

    #[test]
    fn test_blank_field_rows_do_not_count() {
        let form = UpdateForm::new("acme", "token")
            .with_source(DataSource::Manual("1".into()))
            .with_field("name", "   ")
            .with_field("", "x");
        assert_eq!(form.validate(), Err(ValidationError::NoFieldsToUpdate));
    }

    #[test]
    fn test_too_many_rows() {
        let mut form = ready_form();
        for i in 0..MAX_FIELD_ROWS {
            form = form.with_field("notes", format!("n{i}"));
        }
        assert_eq!(
            form.validate(),
            Err(ValidationError::too_many_fields(MAX_FIELD_ROWS, 6))
        );
    }

    #[test]
    fn test_target_ids() {
        let manual = ready_form().with_source(DataSource::Manual(" 42 ".into()));
        assert_eq!(manual.target_ids(), vec!["42".to_string()]);

        let csv = ready_form().with_source(DataSource::Csv(vec!["1".into(), "1".into()]));
        assert_eq!(csv.target_ids(), vec!["1".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_reset_keeps_credentials() {
        let mut form = ready_form();
        form.reset();
        assert_eq!(form.subdomain, "acme");
        assert!(form.fields.is_empty());
        assert_eq!(form.source, DataSource::Manual(String::new()));
    }

    #[test]
    fn test_parse_field_argument() {
        assert_eq!(
            parse_field_argument("name=Acme").unwrap(),
            FieldUpdate::new("name", "Acme")
        );
        assert_eq!(
            parse_field_argument("notes=a=b").unwrap(),
            FieldUpdate::new("notes", "a=b")
        );
        assert_eq!(
            parse_field_argument(" tags =").unwrap(),
            FieldUpdate::new("tags", "")
        );
        assert!(matches!(
            parse_field_argument("name"),
            Err(ValidationError::InvalidParameter { .. })
        ));
        assert!(matches!(
            parse_field_argument("=x"),
            Err(ValidationError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_parse_field_argument_rejects_malformed_paths() {
        for argument in ["organization_fields.=x", "organization_fields.a.b=x", "user.name=x"] {
            assert!(
                matches!(
                    parse_field_argument(argument),
                    Err(ValidationError::InvalidParameter { .. })
                ),
                "{argument}"
            );
        }
        assert_eq!(
            parse_field_argument("organization_fields.vip=true").unwrap(),
            FieldUpdate::new("organization_fields.vip", "true")
        );
    }
}
