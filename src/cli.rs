//! Command-line arguments.

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use pkgdeps_config::Overrides;
use std::path::PathBuf;

/// List the packages providing the shared libraries each FILE links against.
#[derive(Debug, Parser)]
#[command(name = "pkgdeps", version, about)]
pub struct Args {
    /// Log to stderr; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    /// Read configuration from this TOML file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Package database to search.
    #[arg(long, value_name = "FILE")]
    pub database: Option<PathBuf>,
    /// Dynamic-linker inspection command.
    #[arg(long, value_name = "PROGRAM")]
    pub ldd: Option<PathBuf>,
    /// Binaries or libraries to report on.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Args {
    /// Parse the process arguments.
    ///
    /// `--help` and `--version` print and exit as usual. Any other parse
    /// failure is returned so the caller can answer with the usage line.
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse().map_err(|err| match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => err,
        })
    }

    pub fn overrides(&self) -> Overrides {
        Overrides { database: self.database.clone(), ldd: self.ldd.clone() }
    }
}
