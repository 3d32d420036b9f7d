//! Utilities shared by integration tests.
//!
//! Gated behind the `test-support` feature so production builds never pull
//! in temp-file plumbing.

use tempfile::TempDir;

use crate::outbound::persistence::{DbPool, PoolConfig, run_migrations};

/// A migrated SQLite database in a temp directory, dropped with the tests.
///
/// SQLite `:memory:` databases are per-connection, which a pool would
/// silently multiply; a real file keeps every pooled connection on the same
/// data.
pub struct TestDatabase {
    pool: DbPool,
    _tempdir: TempDir,
}

impl TestDatabase {
    /// Create a fresh database file and bring it to the current schema.
    ///
    /// # Panics
    ///
    /// Panics when the temp directory, pool, or migrations fail; tests have
    /// no useful way to continue past that.
    #[must_use]
    pub fn new() -> Self {
        let tempdir = tempfile::tempdir().expect("create temp dir for test database");
        let path = tempdir.path().join("tracker.db");
        let pool = DbPool::new(
            PoolConfig::new(path.display().to_string())
                .with_max_size(2)
                .with_min_idle(None),
        )
        .expect("build test pool");
        run_migrations(&pool).expect("apply migrations to test database");

        Self {
            pool,
            _tempdir: tempdir,
        }
    }

    /// Handle to the pooled database.
    #[must_use]
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}
