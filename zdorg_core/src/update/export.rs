//! Result export

use super::result::UpdateResult;
use chrono::{NaiveDate, Utc};

/// Header row of exported CSV files
pub const CSV_HEADER: &str = "Organization ID,Status,Message";

/// Render results as CSV.
///
/// The message column is always quoted; embedded quotes are doubled.
pub fn to_csv(results: &[UpdateResult]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for result in results {
        let status = if result.success { "Success" } else { "Failure" };
        out.push_str(&format!(
            "{},{},\"{}\"\n",
            result.organization_id,
            status,
            result.message.replace('"', "\"\"")
        ));
    }
    out
}

/// Render results as a pretty-printed JSON array
pub fn to_json(results: &[UpdateResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// File name for an export made today
pub fn default_export_filename() -> String {
    export_filename_for(Utc::now().date_naive())
}

pub fn export_filename_for(date: NaiveDate) -> String {
    format!("zendesk-updates-{}.csv", date.format("%Y-%m-%d"))
}
