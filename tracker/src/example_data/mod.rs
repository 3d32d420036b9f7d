//! Example data seeding for demonstration databases.
//!
//! Generated payloads come from the `example-data` crate; this module feeds
//! them through the real services so every seeded record passes the same
//! validation and lifecycle rules as production writes.

mod config;
mod startup;

pub use config::SeedSettings;
pub use startup::{SeedSummary, seed_database};
