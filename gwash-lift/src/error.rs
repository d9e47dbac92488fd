use std::io;
use thiserror::Error;

/// Error type for gwash-lift operations.
#[derive(Error, Debug)]
pub enum ChainError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A chain header line could not be parsed.
    #[error("line {line}: malformed chain header: {msg}")]
    Header { line: usize, msg: String },

    /// An alignment block line could not be parsed.
    #[error("line {line}: malformed alignment block: {msg}")]
    Block { line: usize, msg: String },

    /// File contained no chains at all.
    #[error("chain file contains no chains: {0}")]
    Empty(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for gwash-lift operations.
pub type Result<T> = std::result::Result<T, ChainError>;
