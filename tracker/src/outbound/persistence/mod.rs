//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by SQLite via Diesel with `r2d2` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. Lifecycle policy stays in the services;
//!   adapters report conflicts as typed outcomes.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Guarded mutations**: edit and dispatch check state and write inside
//!   one immediate transaction, so the single-writer assumption is a
//!   convenience rather than a correctness requirement.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use tracker::outbound::persistence::{DbPool, DieselAssetRepository, PoolConfig, run_migrations};
//!
//! let pool = DbPool::new(PoolConfig::new("tracker.db"))?;
//! run_migrations(&pool)?;
//! let assets = DieselAssetRepository::new(pool);
//! ```

mod diesel_asset_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub use diesel_asset_repository::DieselAssetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbConnection, DbPool, PoolConfig, PoolError};

/// Embedded schema migrations, applied with [`run_migrations`].
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying embedded migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to run migrations: {message}")]
pub struct MigrationError {
    /// Underlying migration failure description.
    message: String,
}

/// Bring a database up to the current schema.
///
/// # Errors
///
/// Returns [`MigrationError`] when a connection cannot be checked out or a
/// migration fails to apply.
pub fn run_migrations(pool: &DbPool) -> Result<(), MigrationError> {
    let mut conn = pool.get().map_err(|err| MigrationError {
        message: err.to_string(),
    })?;

    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| MigrationError {
            message: err.to_string(),
        })
}
