//! pkgdeps - which packages does this binary need?
//!
//! For each file given on the command line, asks the dynamic linker (via
//! `ldd`) which shared libraries it loads, then looks up the installed
//! packages those libraries belong to in the `pkg(8)` database.

mod cli;
mod logging;
mod report;

use crate::cli::Args;
use crate::report::Report;
use pkgdeps_config::Config;
use pkgdeps_ldd::Ldd;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::from_env() {
        Ok(args) if !args.files.is_empty() => args,
        _ => {
            usage();
            return ExitCode::FAILURE;
        },
    };
    logging::init(args.verbose);

    let config = match Config::load(args.config.as_deref(), args.overrides()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", &*err);
            return ExitCode::FAILURE;
        },
    };
    let ldd = Ldd::new(&config.ldd);
    tracing::info!(ldd = %ldd.program().display(), database = %config.database.display(), "Starting");

    let mut out = BufWriter::new(io::stdout().lock());
    for file in &args.files {
        let report = Report::generate(&ldd, &config.database, file).await;
        if let Err(err) = report.write_to(&mut out) {
            return write_failed(err);
        }
    }
    match out.flush() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => write_failed(err),
    }
}

fn usage() {
    let argv0 = std::env::args_os().next().unwrap_or_else(|| "pkgdeps".into());
    eprintln!("usage: {} file(s)...", Path::new(&argv0).display());
}

/// A closed pipe (`pkgdeps ... | head`) just means nobody wants the rest.
fn write_failed(err: io::Error) -> ExitCode {
    if err.kind() == io::ErrorKind::BrokenPipe {
        return ExitCode::SUCCESS;
    }
    eprintln!("error: writing report: {err}");
    ExitCode::FAILURE
}
