//! Linker Inspection Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An inspection error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for inspection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The inspection tool could not be launched at all.
    #[display("could not launch {}", _0.display())]
    Spawn(#[error(not(source))] PathBuf),
    /// Reading the tool's output failed part-way through.
    #[display("failed reading output of {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
}
