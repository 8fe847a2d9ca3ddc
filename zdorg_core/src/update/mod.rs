//! Bulk update execution
//!
//! A run sends the same payload to every target organization, one request at
//! a time and in input order. Each organization yields exactly one
//! [`UpdateResult`]; a failure for one organization never stops the run.

pub mod export;
pub mod result;
pub mod runner;

pub use export::{default_export_filename, to_csv, to_json};
pub use result::{ResultIdGenerator, RunSummary, UpdateResult, UpdateResults};
pub use runner::{run, submit};
