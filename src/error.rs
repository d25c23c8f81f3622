//! Error types for the student store and its callers.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed form input. Raised before the store is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input format.")]
    InvalidFormat,

    #[error("Student ID cannot be empty.")]
    EmptyId,

    #[error("Student ID must contain exactly 5 digits.")]
    MalformedId,

    #[error("Name cannot be empty.")]
    EmptyName,

    #[error("Name cannot contain numbers.")]
    NameHasDigits,

    #[error("Age must be positive.")]
    NonPositiveAge,

    #[error("Grade must be between 0.0 and 100.0.")]
    GradeOutOfRange,
}

/// Student store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Student ID {id} already exists.")]
    DuplicateKey { id: String },

    #[error("Student with ID {id} does not exist.")]
    NotFound { id: String },

    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Returns true when `err` is SQLite rejecting a duplicate primary key.
pub(crate) fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
    )
}
