//! Per-file reports.

use pkgdeps_ldd::{Ldd, Libraries};
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;
use tracing::instrument;

/// What was learnt about one file.
#[derive(Debug)]
pub struct Report<'a> {
    pub file: &'a Path,
    pub libraries: Libraries,
    /// `name-version` identifiers of the packages owning `libraries.resolved`.
    pub packages: BTreeSet<String>,
}

impl<'a> Report<'a> {
    /// Inspect `file` and look up the owners of everything it links against.
    ///
    /// Neither a tool that won't run nor a database that won't open is fatal;
    /// both just leave the corresponding part of the report empty.
    #[instrument(skip(ldd))]
    pub async fn generate(ldd: &Ldd, database: &Path, file: &'a Path) -> Self {
        let libraries = ldd.inspect(file).unwrap_or_else(|err| {
            tracing::warn!(error = ?err, "Could not list shared libraries");
            Libraries::default()
        });
        let packages = if libraries.resolved.is_empty() {
            BTreeSet::new()
        } else {
            pkgdeps_pkgdb::resolve(database, &libraries.resolved).await
        };
        Self { file, libraries, packages }
    }

    /// Print the report.
    ///
    /// Files with no resolved libraries (static binaries, non-executables)
    /// print nothing at all. Otherwise the owning packages are listed under
    /// the file name, followed by any libraries the linker couldn't find.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if self.libraries.resolved.is_empty() {
            return Ok(());
        }
        if !self.packages.is_empty() {
            writeln!(w, "{}:", self.file.display())?;
            for package in &self.packages {
                writeln!(w, "  {package}")?;
            }
        }
        if !self.libraries.missing.is_empty() {
            writeln!(w)?;
            writeln!(w, "  libs not found:")?;
            for library in &self.libraries.missing {
                writeln!(w, "    {library}")?;
            }
        }
        Ok(())
    }
}
