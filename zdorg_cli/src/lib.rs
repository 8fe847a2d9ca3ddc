//! zdorg CLI library
//!
//! Configuration, terminal handling, output formatting and the update
//! orchestrator behind the `zdorg` binary.

pub mod config;
pub mod error;
pub mod orchestrators;
pub mod output;
pub mod paths;
pub mod terminal;

pub use error::{CliError, CliResult, ErrorContext, ExitCode};
