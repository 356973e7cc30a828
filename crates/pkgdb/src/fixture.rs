//! Throwaway package databases for tests.
//!
//! Builds a SQLite file with the subset of the `pkg(8)` schema that lookups
//! touch. Unlike the real schema, `files.path` is not unique here so tests
//! can model two packages claiming the same file.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCHEMA: &str = r#"
    CREATE TABLE packages (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        version TEXT NOT NULL
    );
    CREATE TABLE files (
        package_id INTEGER NOT NULL REFERENCES packages(id),
        path TEXT NOT NULL
    );
"#;

/// A package database living in a temporary directory.
///
/// The directory (and database) is deleted when the fixture is dropped.
pub struct Fixture {
    _dir: TempDir,
    path: PathBuf,
    pool: SqlitePool,
}

impl Fixture {
    /// A database with the package schema and no packages.
    pub async fn new() -> Self {
        let fixture = Self::empty().await;
        sqlx::raw_sql(SCHEMA).execute(&fixture.pool).await.expect("failed to create fixture schema");
        fixture
    }

    /// A valid SQLite database without any tables.
    pub async fn empty() -> Self {
        let dir = tempfile::tempdir().expect("failed to create fixture directory");
        let path = dir.path().join("local.sqlite");
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            // Keep everything in the one file so read-only handles see it all.
            .journal_mode(SqliteJournalMode::Delete);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("failed to create fixture database");
        Self { _dir: dir, path, pool }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a package and the files it installed.
    pub async fn package(&self, id: i64, name: &str, version: &str, files: &[&str]) {
        sqlx::query("INSERT INTO packages (id, name, version) VALUES (?1, ?2, ?3)")
            .bind(id)
            .bind(name)
            .bind(version)
            .execute(&self.pool)
            .await
            .expect("failed to insert fixture package");
        for file in files {
            sqlx::query("INSERT INTO files (package_id, path) VALUES (?1, ?2)")
                .bind(id)
                .bind(*file)
                .execute(&self.pool)
                .await
                .expect("failed to insert fixture file");
        }
    }
}
