//! Read-only connection to the package database.

use exn::ResultExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::package::Package;

const OWNERS_QUERY: &str = include_str!("../queries/owners.sql");

/// A read-only handle on the package database.
///
/// The database belongs to the package manager; this handle never creates,
/// migrates or writes to it.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database at `path` for reading.
    ///
    /// Fails if the file doesn't exist rather than creating an empty one.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new().filename(path).read_only(true).create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            // Lookups run one after another; a second connection would never be used.
            .max_connections(1)
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Open(path.to_path_buf()))?;
        tracing::debug!("Opened package database");
        Ok(Self { pool })
    }

    /// Every package that installed a file at exactly `path`.
    pub async fn packages_for(&self, path: &str) -> Result<Vec<Package>> {
        sqlx::query_as::<_, Package>(OWNERS_QUERY)
            .bind(path)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Query(path.to_string()))
    }

    /// Identifiers (`name-version`) of all packages owning any of `paths`.
    ///
    /// Each path is looked up on its own. A failed lookup is logged and
    /// skipped so one bad path doesn't hide the owners of the rest; paths
    /// no package claims simply contribute nothing.
    #[instrument(skip_all)]
    pub async fn owners<I, S>(&self, paths: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut identifiers = BTreeSet::new();
        for path in paths {
            let path = path.as_ref();
            match self.packages_for(path).await {
                Ok(packages) if packages.is_empty() => {
                    tracing::debug!(path, "No package owns library");
                },
                Ok(packages) => identifiers.extend(packages.iter().map(Package::to_string)),
                Err(err) => tracing::warn!(path, error = ?err, "Skipping library after failed lookup"),
            }
        }
        identifiers
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection pool.
    ///
    /// After calling this, the Database instance should not be used.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
