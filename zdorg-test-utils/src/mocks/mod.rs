//! Mock implementations for testing

mod client;

pub use client::{MockOrganizationApi, MockOutcome, RecordedCall};
