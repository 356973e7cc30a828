//! Package ownership lookups against the local `pkg(8)` database.
//!
//! The database is owned by the package manager and only ever read here. The
//! two tables involved are `packages (id, name, version)` and
//! `files (package_id, path)`; a library belongs to every package with a
//! `files` row whose path matches it exactly.

mod db;
pub mod error;
#[cfg(any(test, feature = "fixture"))]
pub mod fixture;
mod package;

pub use crate::db::Database;
pub use crate::package::Package;

use std::collections::BTreeSet;
use std::path::Path;
use tracing::instrument;

/// Identifiers of the packages owning any of `libraries`.
///
/// Opens the database at `database`, looks every library up, and closes it
/// again. A database that can't be opened yields no packages; the failure is
/// logged rather than returned since it shouldn't stop a report.
#[instrument(skip(libraries))]
pub async fn resolve<I, S>(database: &Path, libraries: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let db = match Database::open(database).await {
        Ok(db) => db,
        Err(err) => {
            tracing::warn!(error = ?err, "Package database unavailable");
            return BTreeSet::new();
        },
    };
    let packages = db.owners(libraries).await;
    db.close().await;
    packages
}
