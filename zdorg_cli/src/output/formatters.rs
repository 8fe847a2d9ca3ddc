use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use zdorg_core::UpdateResult;
use zdorg_core::update::export;

/// Human-readable formatter, one line per organization
pub struct HumanFormatter {
    use_color: bool,
}

impl HumanFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_single(&self, result: &UpdateResult) -> Result<String> {
        let (mark, status) = if result.success {
            (
                self.colorize("✓", |s| s.green()),
                self.colorize("Success", |s| s.green()),
            )
        } else {
            (
                self.colorize("✗", |s| s.red()),
                self.colorize("Failure", |s| s.red()),
            )
        };

        let mut line = format!(
            "{mark} {} {status}: {}",
            self.colorize(&result.organization_id, |s| s.bold()),
            result.message
        );
        if let Some(fields) = result.fields.as_ref().filter(|f| !f.is_empty()) {
            let fields = fields.join(", ");
            line.push_str(&format!(" [{}]", self.colorize(&fields, |s| s.cyan())));
        }

        Ok(line)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, result: &UpdateResult) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }

    fn format_batch(&self, results: &[UpdateResult]) -> Result<String> {
        if self.pretty {
            Ok(export::to_json(results)?)
        } else {
            Ok(serde_json::to_string(results)?)
        }
    }
}

/// CSV formatter matching the export file layout
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_single(&self, result: &UpdateResult) -> Result<String> {
        self.format_batch(std::slice::from_ref(result))
    }

    fn format_batch(&self, results: &[UpdateResult]) -> Result<String> {
        Ok(export::to_csv(results).trim_end().to_string())
    }
}
