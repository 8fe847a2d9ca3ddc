//! CSV format error types

use std::path::PathBuf;
use thiserror::Error;

/// The CSV input could not be turned into organization IDs
#[derive(Error, Debug)]
pub enum FormatError {
    /// No non-empty line in the input
    #[error("CSV file is empty")]
    Empty,

    /// The header has no accepted ID column
    #[error("CSV file must contain an 'organization_id' column")]
    MissingIdColumn,

    /// File exceeds the accepted size
    #[error("File too large: {size} bytes exceeds maximum of {max_size} bytes")]
    TooLarge { size: u64, max_size: u64 },

    /// The file could not be read
    #[error("Failed to read CSV file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be tokenised
    #[error("Malformed CSV at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl FormatError {
    /// Create an unreadable file error
    pub fn unreadable(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a file too large error
    pub fn too_large(size: u64, max_size: u64) -> Self {
        Self::TooLarge { size, max_size }
    }
}

impl From<csv::Error> for FormatError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or_default();
        Self::Malformed {
            line,
            message: err.to_string(),
        }
    }
}
