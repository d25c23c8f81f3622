//! SQLite-backed student records.
//!
//! # Intention
//!
//! - Persist a small set of student records in one local SQLite table.
//! - Keep raw form input validation on the caller side, away from the store.
//!
//! # Architectural Boundaries
//!
//! - `sqlite` owns the connection and every SQL statement.
//! - `validation` and `cli` never touch the database directly.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod sqlite;
pub mod student;
pub mod validation;

pub use error::{StoreError, StoreResult, ValidationError};
pub use sqlite::{Mutation, StoreConfig, StudentStore};
pub use student::StudentRecord;
