//! Error types for identifier parsing

use thiserror::Error;

/// Failure to parse an address or collection id from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    #[error("Invalid address length: expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid hex in address: {input}")]
    InvalidHex { input: String },
}
