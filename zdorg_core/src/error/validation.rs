//! Validation related error types

use thiserror::Error;

/// Errors in user input, detected before any network activity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Missing required input
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A CSV data source produced no organization IDs
    #[error("No organization IDs to update; load a CSV file with at least one ID")]
    NoOrganizationIds,

    /// No field row carries both a field name and a value
    #[error("Specify at least one field to update")]
    NoFieldsToUpdate,

    /// More field rows than a form accepts
    #[error("Too many fields: {actual} given, at most {max} allowed")]
    TooManyFields { max: usize, actual: usize },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// A submission is already running for this form
    #[error("An update is already in progress")]
    SubmissionInProgress,
}

impl ValidationError {
    /// Create a missing field error
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// Create a too many fields error
    pub fn too_many_fields(max: usize, actual: usize) -> Self {
        Self::TooManyFields { max, actual }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }
}
