//! Asset lifecycle and query services.
//!
//! The service owns the receive/edit/dispatch/delete contract and the
//! listing/search surface. Repositories report state conflicts as data
//! ([`LifecycleUpdate`]); the policy response — which domain error the
//! presentation collaborator sees — lives here.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};
use uuid::Uuid;

use tracking_code::{MintError, TrackingCode, mint};

use crate::domain::asset::{Asset, AssetDraft, AssetName, AssetPatch, BranchName, DispatchRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::{
    AssetRepository, AssetRepositoryError, InsertOutcome, LifecycleUpdate, SignatureDirectory,
    SignatureDirectoryError,
};
use crate::domain::search::{AssetSearch, LifecycleScope, SearchValidationError};
use crate::domain::user::UserId;

/// Upper bound on insert retries after a tracking-code race.
const MAX_INSERT_ATTEMPTS: usize = 8;

fn map_repository_error(error: AssetRepositoryError) -> DomainError {
    match error {
        AssetRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("asset store unavailable: {message}"))
        }
        AssetRepositoryError::Query { message } => {
            DomainError::internal(format!("asset store error: {message}"))
        }
    }
}

fn map_directory_error(error: SignatureDirectoryError) -> DomainError {
    match error {
        SignatureDirectoryError::Connection { message } => {
            DomainError::service_unavailable(format!("signature directory unavailable: {message}"))
        }
        SignatureDirectoryError::Query { message } => {
            DomainError::internal(format!("signature directory error: {message}"))
        }
    }
}

fn map_search_error(error: SearchValidationError) -> DomainError {
    match error {
        SearchValidationError::UnknownField { .. }
        | SearchValidationError::FieldNotInScope { .. } => {
            DomainError::invalid_field(error.to_string())
        }
        SearchValidationError::EmptyTerm | SearchValidationError::InvalidDate { .. } => {
            DomainError::validation(error.to_string())
        }
    }
}

/// Receipt payload recorded when an asset arrives at headquarters.
///
/// Blank `asset_code`/`serial_number` values are stored as absent; a blank
/// `asset_name` or `branch_name` is rejected.
#[derive(Debug, Clone)]
pub struct ReceiveAsset {
    /// Asset description (required).
    pub asset_name: String,
    /// Inventory code (optional).
    pub asset_code: String,
    /// Manufacturer serial number (optional).
    pub serial_number: String,
    /// Destination branch (required).
    pub branch_name: String,
    /// Receipt date; defaults to today when absent.
    pub received_on: Option<chrono::NaiveDate>,
    /// User recording the receipt.
    pub received_by: UserId,
}

/// Replacement values for the four editable fields of an asset.
#[derive(Debug, Clone)]
pub struct EditAsset {
    /// Replacement asset description.
    pub asset_name: String,
    /// Replacement inventory code.
    pub asset_code: String,
    /// Replacement branch name.
    pub branch_name: String,
    /// Replacement serial number.
    pub serial_number: String,
}

/// Asset lifecycle and query service.
#[derive(Clone)]
pub struct AssetService<R, S> {
    assets: Arc<R>,
    signatures: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<R, S> AssetService<R, S> {
    /// Create a service over an asset repository and a signature directory.
    pub fn new(assets: Arc<R>, signatures: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            assets,
            signatures,
            clock,
        }
    }
}

impl<R, S> AssetService<R, S>
where
    R: AssetRepository,
    S: SignatureDirectory,
{
    /// Record a newly received asset and return its fresh tracking code.
    ///
    /// Validates required fields, requires the receiving user's signature on
    /// file, mints a collision-free tracking code, and persists the record
    /// in the active state. A uniqueness race on insert re-mints rather
    /// than failing.
    pub fn receive(&self, request: ReceiveAsset) -> Result<TrackingCode, DomainError> {
        AssetName::new(&request.asset_name)
            .map_err(|err| DomainError::validation(err.to_string()))?;
        BranchName::new(&request.branch_name)
            .map_err(|err| DomainError::validation(err.to_string()))?;

        let received_signature = self
            .signatures
            .signature_path(&request.received_by)
            .map_err(map_directory_error)?
            .ok_or_else(|| {
                DomainError::signature_missing("receiving user has no signature on file")
            })?;

        let received_on = request
            .received_on
            .unwrap_or_else(|| self.clock.utc().date_naive());
        let mut rng = rand::thread_rng();

        for _ in 0..MAX_INSERT_ATTEMPTS {
            let code = mint(&mut rng, |candidate| self.assets.code_exists(candidate))
                .map_err(|err| match err {
                    MintError::Probe(repo_err) => map_repository_error(repo_err),
                    MintError::Exhausted { attempts } => DomainError::internal(format!(
                        "no free tracking code after {attempts} attempts"
                    )),
                })?;

            let asset = Asset::new(AssetDraft {
                id: Uuid::new_v4(),
                tracking_code: code.clone(),
                asset_name: request.asset_name.clone(),
                asset_code: Some(request.asset_code.clone()),
                serial_number: Some(request.serial_number.clone()),
                branch_name: request.branch_name.clone(),
                received_on,
                received_by: request.received_by,
                received_signature: received_signature.clone(),
                dispatch: None,
            })
            .map_err(|err| DomainError::validation(err.to_string()))?;

            match self.assets.insert(&asset).map_err(map_repository_error)? {
                InsertOutcome::Created => {
                    info!(code = %code, branch = %asset.branch(), "asset received");
                    return Ok(code);
                }
                InsertOutcome::CodeTaken => {
                    debug!(code = %code, "tracking code raced another insert, reminting");
                }
            }
        }

        Err(DomainError::internal(format!(
            "could not allocate a unique tracking code after {MAX_INSERT_ATTEMPTS} attempts"
        )))
    }

    /// Replace the editable fields of an active asset.
    ///
    /// All four fields are required; dispatched assets can no longer be
    /// edited.
    pub fn edit(&self, code: &TrackingCode, request: EditAsset) -> Result<(), DomainError> {
        let patch = AssetPatch::try_new(
            &request.asset_name,
            &request.asset_code,
            &request.branch_name,
            &request.serial_number,
        )
        .map_err(|err| DomainError::validation(err.to_string()))?;

        match self
            .assets
            .update_details(code, &patch)
            .map_err(map_repository_error)?
        {
            LifecycleUpdate::Applied => Ok(()),
            LifecycleUpdate::Missing => {
                Err(DomainError::not_found(format!("asset {code} not found")))
            }
            LifecycleUpdate::AlreadyDispatched => Err(DomainError::invalid_state(format!(
                "asset {code} has been dispatched and can no longer be edited"
            ))),
        }
    }

    /// Dispatch an active asset to its branch.
    ///
    /// Stamps the dispatch timestamp, dispatcher, and dispatcher signature
    /// as one atomic unit; an asset can be dispatched exactly once.
    pub fn dispatch(
        &self,
        code: &TrackingCode,
        dispatched_by: &UserId,
    ) -> Result<(), DomainError> {
        let signature = self
            .signatures
            .signature_path(dispatched_by)
            .map_err(map_directory_error)?
            .ok_or_else(|| {
                DomainError::signature_missing("dispatching user has no signature on file")
            })?;

        let record = DispatchRecord {
            dispatched_at: self.clock.utc(),
            dispatched_by: *dispatched_by,
            signature,
        };

        match self
            .assets
            .mark_dispatched(code, &record)
            .map_err(map_repository_error)?
        {
            LifecycleUpdate::Applied => {
                info!(code = %code, dispatcher = %dispatched_by, "asset dispatched");
                Ok(())
            }
            LifecycleUpdate::Missing => {
                Err(DomainError::not_found(format!("asset {code} not found")))
            }
            LifecycleUpdate::AlreadyDispatched => Err(DomainError::invalid_state(format!(
                "asset {code} has already been dispatched"
            ))),
        }
    }

    /// Remove an asset record regardless of lifecycle state.
    ///
    /// Deleting an unknown code is a no-op success, preserving the
    /// behaviour the reception desk has always relied on.
    pub fn delete(&self, code: &TrackingCode) -> Result<(), DomainError> {
        let removed = self.assets.delete(code).map_err(map_repository_error)?;
        if removed {
            info!(code = %code, "asset deleted");
        } else {
            debug!(code = %code, "delete of unknown tracking code treated as a no-op");
        }
        Ok(())
    }

    /// Fetch a single asset by tracking code.
    pub fn asset(&self, code: &TrackingCode) -> Result<Asset, DomainError> {
        self.assets
            .find_by_code(code)
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("asset {code} not found")))
    }

    /// List active assets, newest receipt first.
    pub fn list_active(&self) -> Result<Vec<Asset>, DomainError> {
        self.assets
            .list(LifecycleScope::Active)
            .map_err(map_repository_error)
    }

    /// List dispatched assets, newest dispatch first.
    pub fn list_dispatched(&self) -> Result<Vec<Asset>, DomainError> {
        self.assets
            .list(LifecycleScope::Dispatched)
            .map_err(map_repository_error)
    }

    /// Search assets in a scope by a labelled field and term.
    ///
    /// The field label must come from the allow-list; anything else is an
    /// `InvalidField` error rather than an empty result.
    pub fn search(
        &self,
        scope: LifecycleScope,
        field_label: &str,
        term: &str,
    ) -> Result<Vec<Asset>, DomainError> {
        let query = AssetSearch::new(scope, field_label, term).map_err(map_search_error)?;
        self.assets.search(&query).map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "asset_service_tests.rs"]
mod tests;
