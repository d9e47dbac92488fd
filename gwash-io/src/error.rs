use std::io;
use thiserror::Error;

/// Error type for gwash-io operations.
#[derive(Error, Debug)]
pub enum LoadError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A bound source column is missing from the header row.
    #[error("column '{0}' not found in header")]
    MissingColumn(String),

    /// A cell could not be coerced into its canonical numeric type.
    #[error("line {line}: can't parse {field} value '{value}'")]
    Coercion {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// A data row has fewer cells than the header binds.
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// File yielded no records at all.
    #[error("no records found in the file: {0}")]
    EmptyTable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for gwash-io operations.
pub type Result<T> = std::result::Result<T, LoadError>;
