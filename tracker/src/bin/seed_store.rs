//! Seed a tracker database with deterministic example users and assets.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tracker::example_data::{SeedSettings, seed_database};
use tracker::outbound::persistence::{DbPool, PoolConfig, run_migrations};

/// `seed-store` command arguments.
///
/// Anything left unset falls back to `TRACKER_SEED_*` environment values,
/// then to built-in defaults.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-store",
    about = "Create or top up a tracker SQLite database with example data",
    version
)]
struct CliArgs {
    /// Path of the SQLite database file to create or top up.
    #[arg(long = "database", value_name = "path")]
    database_path: Option<String>,
    /// Seed value driving deterministic generation.
    #[arg(long = "seed", value_name = "n")]
    seed: Option<u64>,
    /// Number of user accounts to generate.
    #[arg(long = "users", value_name = "n")]
    user_count: Option<usize>,
    /// Number of asset receipts to generate.
    #[arg(long = "assets", value_name = "n")]
    asset_count: Option<usize>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = SeedSettings::load_from_iter([OsString::from("seed-store")])
        .map_err(|err| io::Error::other(format!("failed to load seed settings: {err}")))?;

    let database_path = args
        .database_path
        .unwrap_or_else(|| settings.database_path().to_owned());
    let seed = args.seed.unwrap_or_else(|| settings.seed());
    let user_count = args.user_count.unwrap_or_else(|| settings.user_count());
    let asset_count = args.asset_count.unwrap_or_else(|| settings.asset_count());

    info!(database = %database_path, seed, user_count, asset_count, "seeding tracker store");

    let pool = DbPool::new(PoolConfig::new(&database_path))
        .map_err(|err| io::Error::other(err.to_string()))?;
    run_migrations(&pool).map_err(|err| io::Error::other(err.to_string()))?;

    let summary = seed_database(&pool, Arc::new(DefaultClock), seed, user_count, asset_count)
        .map_err(|err| io::Error::other(err.to_string()))?;

    info!(
        users = summary.users,
        assets = summary.assets,
        dispatched = summary.dispatched,
        database = %database_path,
        "seeding complete"
    );
    Ok(())
}
