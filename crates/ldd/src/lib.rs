//! Shared library discovery via the system `ldd`.
//!
//! Rather than parsing ELF headers ourselves, we ask the dynamic linker which
//! libraries a binary would load and where it would find them. The textual
//! output is matched line by line in [`parse`], so the matching rule can
//! change without touching anything that consumes [`Libraries`].

pub mod error;
pub mod parse;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::instrument;

pub use crate::parse::{Entry, Libraries, parse_line};

/// A dynamic-linker inspection command.
#[derive(Clone, Debug)]
pub struct Ldd {
    program: PathBuf,
}

impl Ldd {
    /// Prepare an inspector for `program`.
    ///
    /// The program is looked up on `PATH` once, up front. If it can't be
    /// found the name is kept as-is: every later [`inspect`](Self::inspect)
    /// will then fail to spawn, which callers treat as "no libraries".
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        match which::which(&program) {
            Ok(path) => {
                tracing::debug!(program = %path.display(), "Located linker inspection tool");
                Self { program: path }
            },
            Err(err) => {
                tracing::info!(program = %program.display(), error = %err, "Linker inspection tool not found in PATH");
                Self { program }
            },
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the tool against `file` and collect the libraries it reports.
    ///
    /// The child's stdout is always drained and the child always reaped,
    /// including when reading fails. A non-zero exit status is not an error;
    /// `ldd` exits non-zero for static binaries, and whatever it printed
    /// before that is still returned.
    #[instrument(skip(self), fields(program = %self.program.display()))]
    pub fn inspect(&self, file: &Path) -> Result<Libraries> {
        let mut child = Command::new(&self.program)
            .arg(as_argument(file))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .or_raise(|| ErrorKind::Spawn(self.program.clone()))?;
        let parsed = match child.stdout.take() {
            Some(stdout) => Libraries::from_reader(BufReader::new(stdout)),
            None => Ok(Libraries::default()),
        };
        if parsed.is_err() {
            // Don't leave the child blocked on a pipe nobody is reading.
            _ = child.kill();
        }
        match child.wait() {
            Ok(status) if !status.success() => {
                tracing::debug!(%status, "Linker inspection tool exited unsuccessfully");
            },
            Ok(_) => {},
            Err(err) => tracing::warn!(error = %err, "Failed to reap linker inspection tool"),
        }
        let libraries = parsed.or_raise(|| ErrorKind::Io(self.program.clone()))?;
        tracing::debug!(
            resolved = libraries.resolved.len(),
            missing = libraries.missing.len(),
            "Collected shared libraries"
        );
        Ok(libraries)
    }
}

/// Relative paths starting with `-` would be read as options.
fn as_argument(file: &Path) -> PathBuf {
    match file.components().next() {
        Some(Component::Normal(first)) if first.to_string_lossy().starts_with('-') => {
            Path::new(".").join(file)
        },
        _ => file.to_path_buf(),
    }
}
