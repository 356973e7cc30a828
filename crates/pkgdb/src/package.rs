use derive_more::Display;

/// An installed package, as far as ownership lookups care.
///
/// Displays in the `name-version` form `pkg(8)` itself prints.
#[derive(Clone, Debug, Display, PartialEq, Eq, sqlx::FromRow)]
#[display("{name}-{version}")]
pub struct Package {
    pub name: String,
    pub version: String,
}
