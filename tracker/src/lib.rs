//! Asset lifecycle, identity, and query core for the tracker application.
//!
//! The presentation layer (windows, dialogs, signature capture) lives in a
//! separate collaborator; this crate owns the records, their lifecycle
//! invariants, and the persistence adapters behind them.

pub mod domain;
pub mod outbound;

#[cfg(feature = "example-data")]
pub mod example_data;

#[cfg(feature = "test-support")]
pub mod test_support;
