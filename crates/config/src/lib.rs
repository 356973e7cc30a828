//! Configuration for pkgdeps.
//!
//! Values are layered with `figment`, each layer overriding the one before:
//!
//! 1. Built-in defaults (`/var/db/pkg/local.sqlite`, `ldd`)
//! 2. A TOML file: an explicitly requested one, otherwise
//!    `config.toml` in the user's config directory if it exists
//! 3. `PKGDEPS_DATABASE` and `PKGDEPS_LDD` environment variables
//! 4. Command-line overrides

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where `pkg(8)` keeps its local database.
pub const DEFAULT_DATABASE: &str = "/var/db/pkg/local.sqlite";
/// The dynamic-linker inspection command.
pub const DEFAULT_LDD: &str = "ldd";

const ENV_PREFIX: &str = "PKGDEPS_";
const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The package database to look library owners up in.
    pub database: PathBuf,
    /// The dynamic-linker inspection command.
    pub ldd: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self { database: PathBuf::from(DEFAULT_DATABASE), ldd: PathBuf::from(DEFAULT_LDD) }
    }
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldd: Option<PathBuf>,
}

impl Config {
    /// Load configuration from every layer.
    ///
    /// An explicit `file` must exist; the default location is optional.
    pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let file = match file {
            Some(path) => Some(std::fs::canonicalize(path).or_raise(|| ErrorKind::NotFound(path.to_path_buf()))?),
            None => default_file(),
        };
        let figment = Self::figment(file.as_deref()).merge(Serialized::defaults(overrides));
        match figment.extract::<Self>() {
            Ok(config) => {
                tracing::debug!(?config, "Configuration loaded");
                Ok(config)
            },
            Err(err) => exn::bail!(ErrorKind::Invalid(err.to_string())),
        }
    }

    /// Every layer below the command line.
    fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            tracing::trace!(file = %file.display(), "Reading configuration file");
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).only(&["database", "ldd"]))
    }
}

/// `config.toml` in the platform config directory, if it exists.
fn default_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "pkgdeps")?;
    let path = dirs.config_dir().join(CONFIG_FILE);
    path.is_file().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = Config::figment(None).extract::<Config>()?;
            assert_eq!(config.database, PathBuf::from("/var/db/pkg/local.sqlite"));
            assert_eq!(config.ldd, PathBuf::from("ldd"));
            Ok(())
        });
    }

    #[test]
    fn test_layering() {
        Jail::expect_with(|jail| {
            jail.create_file("pkgdeps.toml", "database = \"/srv/pkg/local.sqlite\"\nldd = \"/usr/bin/ldd\"\n")?;
            let config = Config::load(Some(Path::new("pkgdeps.toml")), Overrides::default()).unwrap();
            assert_eq!(config.database, PathBuf::from("/srv/pkg/local.sqlite"));
            assert_eq!(config.ldd, PathBuf::from("/usr/bin/ldd"));

            jail.set_env("PKGDEPS_DATABASE", "/tmp/env.sqlite");
            let config = Config::load(Some(Path::new("pkgdeps.toml")), Overrides::default()).unwrap();
            assert_eq!(config.database, PathBuf::from("/tmp/env.sqlite"));
            assert_eq!(config.ldd, PathBuf::from("/usr/bin/ldd"));

            let overrides = Overrides { database: Some(PathBuf::from("/tmp/cli.sqlite")), ldd: None };
            let config = Config::load(Some(Path::new("pkgdeps.toml")), overrides).unwrap();
            assert_eq!(config.database, PathBuf::from("/tmp/cli.sqlite"));
            assert_eq!(config.ldd, PathBuf::from("/usr/bin/ldd"));
            Ok(())
        });
    }

    #[test]
    fn test_unrelated_env_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("PKGDEPS_LOG", "debug");
            jail.set_env("PKGDEPS_LDD", "/opt/bin/ldd");
            let config = Config::figment(None).extract::<Config>()?;
            assert_eq!(config.ldd, PathBuf::from("/opt/bin/ldd"));
            Ok(())
        });
    }

    /// `directories` follows `XDG_CONFIG_HOME` everywhere but macOS and Windows.
    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_default_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let directory = jail.directory().to_path_buf();
            jail.set_env("XDG_CONFIG_HOME", directory.display());
            assert_eq!(default_file(), None);
            let config = Config::load(None, Overrides::default()).unwrap();
            assert_eq!(config, Config::default());

            std::fs::create_dir(jail.directory().join("pkgdeps")).unwrap();
            jail.create_file("pkgdeps/config.toml", "database = \"/srv/pkg/local.sqlite\"\n")?;
            assert_eq!(default_file(), Some(jail.directory().join("pkgdeps").join(CONFIG_FILE)));
            let config = Config::load(None, Overrides::default()).unwrap();
            assert_eq!(config.database, PathBuf::from("/srv/pkg/local.sqlite"));
            assert_eq!(config.ldd, PathBuf::from(DEFAULT_LDD));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|_jail| {
            let err = Config::load(Some(Path::new("nope.toml")), Overrides::default()).unwrap_err();
            assert!(matches!(&*err, ErrorKind::NotFound(_)));
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file() {
        Jail::expect_with(|jail| {
            jail.create_file("broken.toml", "database = [1, 2")?;
            let err = Config::load(Some(Path::new("broken.toml")), Overrides::default()).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid(_)));
            Ok(())
        });
    }
}
