//! CLI command implementations.

pub(crate) mod migrate;
pub(crate) mod seed;

pub(crate) use migrate::MigrateArgs;
pub(crate) use seed::SeedArgs;
