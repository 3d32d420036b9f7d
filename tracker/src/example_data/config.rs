//! Seeding configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATABASE_PATH: &str = "tracker.db";
const DEFAULT_SEED: u64 = 2026;
const DEFAULT_USER_COUNT: usize = 4;
const DEFAULT_ASSET_COUNT: usize = 24;

/// Configuration values controlling example data seeding.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER_SEED")]
pub struct SeedSettings {
    /// Path of the SQLite database file to create or top up.
    pub database_path: Option<String>,
    /// Seed value driving deterministic generation.
    pub seed: Option<u64>,
    /// Number of user accounts to generate.
    #[ortho_config(file_key = "user_count")]
    pub user_count: Option<usize>,
    /// Number of asset receipts to generate.
    pub asset_count: Option<usize>,
}

impl SeedSettings {
    /// Return the configured database path, falling back to the default.
    pub fn database_path(&self) -> &str {
        self.database_path.as_deref().unwrap_or(DEFAULT_DATABASE_PATH)
    }

    /// Return the configured seed, falling back to the default.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Return the configured user count, falling back to the default.
    pub fn user_count(&self) -> usize {
        self.user_count.unwrap_or(DEFAULT_USER_COUNT)
    }

    /// Return the configured asset count, falling back to the default.
    pub fn asset_count(&self) -> usize {
        self.asset_count.unwrap_or(DEFAULT_ASSET_COUNT)
    }
}
