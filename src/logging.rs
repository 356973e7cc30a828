//! Diagnostics go to stderr and are off unless asked for, so that by default
//! stderr only ever carries the usage message.

use tracing_subscriber::EnvFilter;

/// Takes precedence over `-v` flags when set.
const LOG_ENV: &str = "PKGDEPS_LOG";

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level(verbosity)));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "off",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}
