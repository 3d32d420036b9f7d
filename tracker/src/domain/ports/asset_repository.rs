//! Port for asset record persistence, lifecycle updates, and queries.

use tracking_code::TrackingCode;

use crate::domain::asset::{Asset, AssetPatch, DispatchRecord};
use crate::domain::search::{AssetSearch, LifecycleScope};

/// Errors raised by asset repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetRepositoryError {
    /// Repository connection could not be established.
    #[error("asset repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("asset repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl AssetRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Result of inserting a freshly minted asset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was persisted.
    Created,
    /// Another record already holds the tracking code; mint again.
    CodeTaken,
}

/// Result of a state-guarded mutation on an asset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleUpdate {
    /// The mutation was applied.
    Applied,
    /// No record carries the tracking code.
    Missing,
    /// The record has already been dispatched; the mutation was not applied.
    AlreadyDispatched,
}

/// Port for writing and querying asset records.
///
/// Adapters report lifecycle conflicts through [`LifecycleUpdate`] and leave
/// the policy response (which domain error to raise) to the service. The
/// state-guarded mutations must check and mutate as one atomic unit against
/// the backing store.
#[cfg_attr(test, mockall::automock)]
pub trait AssetRepository: Send + Sync {
    /// Persist a newly received (active) asset record.
    ///
    /// Records enter the store active; dispatch happens only through
    /// [`AssetRepository::mark_dispatched`].
    fn insert(&self, asset: &Asset) -> Result<InsertOutcome, AssetRepositoryError>;

    /// Whether any record already holds the given tracking code.
    fn code_exists(&self, code: &TrackingCode) -> Result<bool, AssetRepositoryError>;

    /// Find an asset by tracking code.
    fn find_by_code(&self, code: &TrackingCode) -> Result<Option<Asset>, AssetRepositoryError>;

    /// Replace the four editable fields of an active asset.
    fn update_details(
        &self,
        code: &TrackingCode,
        patch: &AssetPatch,
    ) -> Result<LifecycleUpdate, AssetRepositoryError>;

    /// Stamp the dispatch audit fields on an active asset.
    fn mark_dispatched(
        &self,
        code: &TrackingCode,
        record: &DispatchRecord,
    ) -> Result<LifecycleUpdate, AssetRepositoryError>;

    /// Remove a record regardless of lifecycle state.
    ///
    /// Returns whether a record was actually removed.
    fn delete(&self, code: &TrackingCode) -> Result<bool, AssetRepositoryError>;

    /// List every asset in the given scope, newest first.
    fn list(&self, scope: LifecycleScope) -> Result<Vec<Asset>, AssetRepositoryError>;

    /// Run a validated search.
    fn search(&self, query: &AssetSearch) -> Result<Vec<Asset>, AssetRepositoryError>;
}

/// Fixture implementation for tests that do not exercise asset persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAssetRepository;

impl AssetRepository for FixtureAssetRepository {
    fn insert(&self, _asset: &Asset) -> Result<InsertOutcome, AssetRepositoryError> {
        Ok(InsertOutcome::Created)
    }

    fn code_exists(&self, _code: &TrackingCode) -> Result<bool, AssetRepositoryError> {
        Ok(false)
    }

    fn find_by_code(&self, _code: &TrackingCode) -> Result<Option<Asset>, AssetRepositoryError> {
        Ok(None)
    }

    fn update_details(
        &self,
        _code: &TrackingCode,
        _patch: &AssetPatch,
    ) -> Result<LifecycleUpdate, AssetRepositoryError> {
        Ok(LifecycleUpdate::Missing)
    }

    fn mark_dispatched(
        &self,
        _code: &TrackingCode,
        _record: &DispatchRecord,
    ) -> Result<LifecycleUpdate, AssetRepositoryError> {
        Ok(LifecycleUpdate::Missing)
    }

    fn delete(&self, _code: &TrackingCode) -> Result<bool, AssetRepositoryError> {
        Ok(false)
    }

    fn list(&self, _scope: LifecycleScope) -> Result<Vec<Asset>, AssetRepositoryError> {
        Ok(Vec::new())
    }

    fn search(&self, _query: &AssetSearch) -> Result<Vec<Asset>, AssetRepositoryError> {
        Ok(Vec::new())
    }
}
