//! Organization ID extraction from CSV input
//!
//! The first non-empty line is the header. The ID column is the first header
//! cell (left to right) that matches one of [`ID_COLUMNS`], ignoring case and
//! surrounding whitespace. Every later line contributes the trimmed value in
//! that column; rows where it is missing or empty are skipped.
//!
//! Lines end at `\n` or `\r\n`. Fields are split on every comma. Quoted
//! fields containing commas are not supported.

use crate::error::FormatError;
use log::debug;
use std::path::Path;

/// Maximum accepted CSV file size (10 MB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Header names accepted for the organization ID column
pub const ID_COLUMNS: [&str; 3] = ["organization_id", "org_id", "id"];

/// Opaque Zendesk organization identifier
pub type OrganizationId = String;

/// Parse CSV text into the organization IDs it lists, in file order.
///
/// Duplicates are kept.
pub fn parse(text: &str) -> Result<Vec<OrganizationId>, FormatError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    // Lines end at `\n` or `\r\n` only; a lone `\r` stays inside its line.
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(FormatError::Empty);
    }
    let normalized = lines.join("\n");

    // Quoting is off so commas always split.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .trim(csv::Trim::All)
        .from_reader(normalized.as_bytes());
    let mut records = reader.records();

    let header = records.next().ok_or(FormatError::Empty)??;
    let id_index = header
        .iter()
        .position(|cell| {
            let cell = cell.to_lowercase();
            ID_COLUMNS.contains(&cell.as_str())
        })
        .ok_or(FormatError::MissingIdColumn)?;
    debug!("Using CSV column {id_index} for organization IDs");

    let mut ids = Vec::new();
    for record in records {
        let record = record?;
        match record.get(id_index) {
            Some(id) if !id.is_empty() => ids.push(id.to_string()),
            _ => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                debug!("Skipping CSV line {line}: no organization ID");
            }
        }
    }

    Ok(ids)
}

/// Read a CSV file from disk and parse the organization IDs in it.
///
/// Files larger than [`MAX_FILE_SIZE`] are rejected without being read.
pub async fn load_file(path: &Path) -> Result<Vec<OrganizationId>, FormatError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| FormatError::unreadable(path, e))?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(FormatError::too_large(metadata.len(), MAX_FILE_SIZE));
    }

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FormatError::unreadable(path, e))?;
    let ids = parse(&text)?;
    debug!("Loaded {} organization IDs from {}", ids.len(), path.display());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(items: &[&str]) -> Vec<OrganizationId> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_single_column() {
        assert_eq!(parse("organization_id\n1\n2\n").unwrap(), ids(&["1", "2"]));
    }

    #[test]
    fn test_parse_header_only_yields_nothing() {
        assert_eq!(parse("id\n\n").unwrap(), ids(&[]));
    }

    #[test]
    fn test_parse_missing_id_column() {
        let err = parse("name\nfoo\n").unwrap_err();
        assert!(matches!(err, FormatError::MissingIdColumn));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse("").unwrap_err(), FormatError::Empty));
        assert!(matches!(parse("\n\n\r\n").unwrap_err(), FormatError::Empty));
    }

    #[test]
    fn test_parse_picks_id_column_case_insensitively() {
        let text = "Name, ORG_ID ,notes\nAcme, 101 ,x\nGlobex,202,y\n";
        assert_eq!(parse(text).unwrap(), ids(&["101", "202"]));
    }

    #[test]
    fn test_parse_first_matching_column_wins() {
        let text = "id,organization_id\n1,100\n2,200\n";
        assert_eq!(parse(text).unwrap(), ids(&["1", "2"]));
    }

    #[test]
    fn test_parse_handles_crlf_and_blank_lines() {
        let text = "\r\norganization_id,name\r\n10,Acme\r\n\r\n20,Globex\r\n";
        assert_eq!(parse(text).unwrap(), ids(&["10", "20"]));
    }

    #[test]
    fn test_parse_skips_rows_without_id() {
        let text = "name,organization_id\nAcme,\nGlobex\nInitech,  \nHooli,7\n";
        assert_eq!(parse(text).unwrap(), ids(&["7"]));
    }

    #[test]
    fn test_parse_lone_carriage_return_does_not_end_a_line() {
        assert_eq!(parse("id\n1\r2\n").unwrap(), ids(&["1\r2"]));
        assert!(matches!(
            parse("id\r5\n").unwrap_err(),
            FormatError::MissingIdColumn
        ));
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        assert_eq!(parse("id\n5\n5\n").unwrap(), ids(&["5", "5"]));
    }

    #[test]
    fn test_parse_ignores_byte_order_mark() {
        assert_eq!(parse("\u{feff}organization_id\n42\n").unwrap(), ids(&["42"]));
    }

    #[tokio::test]
    async fn test_load_file_reads_ids() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("orgs.csv");
        std::fs::write(&path, "organization_id\n1\n2\n3\n").unwrap();

        assert_eq!(load_file(&path).await.unwrap(), ids(&["1", "2", "3"]));
    }

    #[tokio::test]
    async fn test_load_file_rejects_oversized_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("big.csv");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_FILE_SIZE + 1).unwrap();

        let err = load_file(&path).await.unwrap_err();
        assert!(matches!(err, FormatError::TooLarge { .. }));
    }

    #[tokio::test]
    async fn test_load_file_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).await.unwrap_err();
        assert!(matches!(err, FormatError::Unreadable { .. }));
    }

    proptest! {
        #[test]
        fn prop_every_non_blank_id_is_extracted(values in prop::collection::vec("[0-9]{1,8}", 0..20)) {
            let mut text = String::from("organization_id\n");
            for value in &values {
                text.push_str(value);
                text.push('\n');
            }
            prop_assert_eq!(parse(&text).unwrap(), values);
        }
    }
}
