use std::io;
use thiserror::Error;

/// Error type for gwash-refdb operations.
#[derive(Error, Debug)]
pub enum RefDbError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The annotation source could not be opened.
    #[error("can't open annotation source {path}: {msg}")]
    Open { path: String, msg: String },

    /// A positional query against the source failed.
    #[error("annotation query failed for {chrom}:{start}-{end}: {msg}")]
    Query {
        chrom: String,
        start: u64,
        end: u64,
        msg: String,
    },

    /// A source record's payload does not follow the documented layout.
    #[error("malformed annotation record at {chrom}:{end}: {msg}")]
    Malformed {
        chrom: String,
        end: u64,
        msg: String,
    },

    /// The index snapshot on disk could not be read or written.
    #[error("snapshot error for {path}: {msg}")]
    Snapshot { path: String, msg: String },
}

/// Result type alias for gwash-refdb operations.
pub type Result<T> = std::result::Result<T, RefDbError>;
