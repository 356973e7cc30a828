//! Package Database Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A package database error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for package database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The database file is missing, unreadable, or not a SQLite database.
    #[display("could not open package database: {}", _0.display())]
    Open(#[error(not(source))] PathBuf),
    /// Looking up the owners of a single file failed.
    #[display("package lookup failed for: {_0}")]
    Query(#[error(not(source))] String),
}
