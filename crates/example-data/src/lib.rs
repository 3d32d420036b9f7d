//! Deterministic example user and asset data generation for demonstration
//! purposes.
//!
//! This crate produces believable, reproducible seed data for the tracker
//! store: front-desk user accounts and received-asset records. It is
//! deliberately independent of the tracker domain types to avoid circular
//! dependencies; the seeding layer feeds these plain payloads through the
//! real services so every seeded record passes production validation.
//!
//! The same seed value always produces identical output.
//!
//! # Example
//!
//! ```
//! use example_data::{generate_example_assets, generate_example_users};
//!
//! let users = generate_example_users(42, 3).expect("generation succeeds");
//! assert_eq!(users.len(), 3);
//!
//! // Same seed, same data.
//! let again = generate_example_users(42, 3).expect("generation succeeds");
//! assert_eq!(users, again);
//!
//! let assets = generate_example_assets(42, 10);
//! assert_eq!(assets.len(), 10);
//! ```

mod catalog;
mod error;
mod generator;
mod seed;

pub use catalog::{ASSET_CATALOG, BRANCHES};
pub use error::GenerationError;
pub use generator::{generate_example_assets, generate_example_users};
pub use seed::{ExampleAssetSeed, ExampleUserSeed};
