mod formatters;

pub use formatters::{CsvFormatter, HumanFormatter, JsonFormatter};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use zdorg_core::UpdateResult;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Human,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "Unknown output format '{other}', expected human, json or csv"
            )),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a single result
    fn format_single(&self, result: &UpdateResult) -> Result<String>;

    /// Format the results of a whole run
    fn format_batch(&self, results: &[UpdateResult]) -> Result<String> {
        let formatted: Result<Vec<String>> =
            results.iter().map(|r| self.format_single(r)).collect();

        Ok(formatted?.join("\n"))
    }
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
