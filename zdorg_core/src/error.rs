//! Error types for the zdorg core library
//!
//! Errors are grouped by where in a submission they surface:
//! - Validation errors: malformed or missing user input, never sent to the server
//! - Format errors: the CSV input cannot be turned into organization IDs
//! - Auth errors: credential verification failed, the run is aborted
//! - Transport errors: a single request failed at the network level
//! - Application errors: the server rejected a single update
//!
//! The first three abort a submission before any organization is updated. The
//! last two are recorded per organization as failed results.

use thiserror::Error;

pub mod api;
pub mod format;
pub mod validation;

pub use self::api::{ApplicationError, AuthError, TransportError};
pub use self::format::FormatError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the zdorg core library
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unusable CSV input
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Credential verification failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Network level failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Server rejected the operation
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl Error {
    /// Whether this error aborts a whole submission rather than one organization
    pub fn aborts_run(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Format(_) | Self::Auth(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_validation_error_is_transparent() {
        let error = Error::from(ValidationError::NoFieldsToUpdate);
        assert_eq!(error.to_string(), "Specify at least one field to update");
        assert!(matches!(error, Error::Validation(_)));
    }

    #[test]
    fn test_format_error_is_transparent() {
        let error = Error::from(FormatError::Empty);
        assert_eq!(error.to_string(), "CSV file is empty");
    }

    #[test]
    fn test_aborting_categories() {
        assert!(Error::from(ValidationError::NoOrganizationIds).aborts_run());
        assert!(Error::from(FormatError::MissingIdColumn).aborts_run());
        assert!(Error::from(AuthError::invalid_credentials("acme")).aborts_run());
        assert!(!Error::from(TransportError::other("reset")).aborts_run());
        assert!(!Error::from(ApplicationError::new("RecordInvalid", None)).aborts_run());
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = Error::from(TransportError::other("timeout"));
        let _: &dyn StdError = &error;
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<()> {
            Err(Error::Validation(ValidationError::missing_field("api_token")))
        }

        assert!(returns_error().is_err());
    }
}
