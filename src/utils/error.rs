//! Error types for the entire library.
//!
//! Every variant is a configuration error: the comparison itself is malformed
//! (bad rename, missing or duplicate identifier, broken value accessor), as
//! opposed to a data mismatch, which is reported as a [`crate::diff::Diff`].

use thiserror::Error;

/// Errors that abort a comparison before a diff can be produced
#[derive(Error, Debug)]
pub enum CmpError {
    #[error("Failed to project record: {0}")]
    Projection(#[from] serde_json::Error),

    #[error("Cannot project {kind} as a record: expected a struct or a string-keyed map")]
    NotARecord { kind: &'static str },

    #[error("Cannot rename field '{from}' to already existing field '{to}'")]
    RenameCollision { from: String, to: String },

    #[error("No '{field}' field in {record}")]
    MissingIdentifier { field: String, record: String },

    #[error("Duplicate '{field}' identifier: {value}")]
    DuplicateIdentifier { field: String, value: String },

    #[error("Value accessor failed at {path}: {message}")]
    ValuerFailed { path: String, message: String },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, CmpError>;
