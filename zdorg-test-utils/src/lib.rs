//! Test utilities for the Zendesk organization updater
//!
//! This crate provides a scriptable mock of the organizations API and
//! builders for field rows and CSV fixtures.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{TestCsvBuilder, TestDataBuilder};
pub use mocks::{MockOrganizationApi, MockOutcome, RecordedCall};
