//! Asset record model and lifecycle value objects.
//!
//! An asset is created once by the receive operation and lives in exactly one
//! of two states: **active** (no dispatch record) or **dispatched** (a
//! complete dispatch record). Grouping the dispatch timestamp, dispatcher,
//! and dispatcher signature into a single [`DispatchRecord`] makes the
//! "all set together, exactly once" rule structural rather than procedural.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use tracking_code::TrackingCode;

use crate::domain::user::{SignaturePath, UserId};

/// Validation errors returned by the asset constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetValidationError {
    /// Asset name was empty once trimmed.
    EmptyAssetName,
    /// Branch name was empty once trimmed.
    EmptyBranchName,
    /// Asset code was empty once trimmed (edits require every field).
    EmptyAssetCode,
    /// Serial number was empty once trimmed (edits require every field).
    EmptySerialNumber,
    /// A stored status string did not match any known lifecycle state.
    UnknownStatus {
        /// The unrecognised stored value.
        value: String,
    },
}

impl fmt::Display for AssetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAssetName => write!(f, "asset name must not be empty"),
            Self::EmptyBranchName => write!(f, "branch name must not be empty"),
            Self::EmptyAssetCode => write!(f, "asset code must not be empty"),
            Self::EmptySerialNumber => write!(f, "serial number must not be empty"),
            Self::UnknownStatus { value } => {
                write!(f, "unknown asset status: {value}")
            }
        }
    }
}

impl std::error::Error for AssetValidationError {}

/// Human-readable asset description, required at receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName(String);

impl AssetName {
    /// Validate and construct an [`AssetName`], trimming whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, AssetValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AssetValidationError::EmptyAssetName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Destination branch recorded against the asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(String);

impl BranchName {
    /// Validate and construct a [`BranchName`], trimming whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, AssetValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AssetValidationError::EmptyBranchName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Lifecycle state of an asset, derived from the dispatch record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetStatus {
    /// Held at headquarters awaiting dispatch.
    Received,
    /// Sent on to a branch; immutable except for deletion.
    Dispatched,
}

impl AssetStatus {
    /// Canonical stored form, matching what the reception desk sees.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "Received at HQ",
            Self::Dispatched => "Dispatched to Branch",
        }
    }

    /// Parse a stored status string.
    pub fn parse(value: &str) -> Result<Self, AssetValidationError> {
        match value {
            "Received at HQ" => Ok(Self::Received),
            "Dispatched to Branch" => Ok(Self::Dispatched),
            other => Err(AssetValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch audit fields, set together exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRecord {
    /// When the asset left headquarters.
    pub dispatched_at: DateTime<Utc>,
    /// Who signed it out.
    pub dispatched_by: UserId,
    /// The dispatcher's signature reference at the time of dispatch.
    pub signature: SignaturePath,
}

/// Unvalidated asset fields used to build an [`Asset`].
#[derive(Debug, Clone)]
pub struct AssetDraft {
    /// Stable record identifier.
    pub id: Uuid,
    /// Unique, immutable tracking code.
    pub tracking_code: TrackingCode,
    /// Asset description (required).
    pub asset_name: String,
    /// Optional inventory code.
    pub asset_code: Option<String>,
    /// Optional manufacturer serial number.
    pub serial_number: Option<String>,
    /// Destination branch (required).
    pub branch_name: String,
    /// Date the asset arrived at headquarters.
    pub received_on: NaiveDate,
    /// User who recorded the receipt.
    pub received_by: UserId,
    /// Receiving user's signature reference at receipt time.
    pub received_signature: SignaturePath,
    /// Dispatch audit fields, present only once dispatched.
    pub dispatch: Option<DispatchRecord>,
}

/// Persisted asset record.
///
/// ## Invariants
/// - `tracking_code` is unique across the store and never reassigned.
/// - `asset_name` and `branch_name` are non-empty.
/// - `asset_code`/`serial_number` are either absent or non-empty.
/// - Exactly one lifecycle state: active (`dispatch` is `None`) or
///   dispatched (`dispatch` carries all three audit fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    id: Uuid,
    tracking_code: TrackingCode,
    name: AssetName,
    asset_code: Option<String>,
    serial_number: Option<String>,
    branch: BranchName,
    received_on: NaiveDate,
    received_by: UserId,
    received_signature: SignaturePath,
    dispatch: Option<DispatchRecord>,
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl Asset {
    /// Validate a draft and construct an [`Asset`].
    ///
    /// Blank optional fields are normalised to `None`.
    pub fn new(draft: AssetDraft) -> Result<Self, AssetValidationError> {
        let AssetDraft {
            id,
            tracking_code,
            asset_name,
            asset_code,
            serial_number,
            branch_name,
            received_on,
            received_by,
            received_signature,
            dispatch,
        } = draft;

        let name = AssetName::new(asset_name)?;
        let branch = BranchName::new(branch_name)?;

        Ok(Self {
            id,
            tracking_code,
            name,
            asset_code: normalize_optional(asset_code),
            serial_number: normalize_optional(serial_number),
            branch,
            received_on,
            received_by,
            received_signature,
            dispatch,
        })
    }

    /// Stable record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique tracking code assigned at receipt.
    pub fn tracking_code(&self) -> &TrackingCode {
        &self.tracking_code
    }

    /// Asset description.
    pub fn name(&self) -> &AssetName {
        &self.name
    }

    /// Inventory code, if recorded.
    pub fn asset_code(&self) -> Option<&str> {
        self.asset_code.as_deref()
    }

    /// Manufacturer serial number, if recorded.
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    /// Destination branch.
    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Date the asset arrived at headquarters.
    pub fn received_on(&self) -> NaiveDate {
        self.received_on
    }

    /// User who recorded the receipt.
    pub fn received_by(&self) -> &UserId {
        &self.received_by
    }

    /// Receiving user's signature reference.
    pub fn received_signature(&self) -> &SignaturePath {
        &self.received_signature
    }

    /// Dispatch audit fields, present only once dispatched.
    pub fn dispatch(&self) -> Option<&DispatchRecord> {
        self.dispatch.as_ref()
    }

    /// Current lifecycle state, derived from the dispatch record.
    pub fn status(&self) -> AssetStatus {
        if self.dispatch.is_some() {
            AssetStatus::Dispatched
        } else {
            AssetStatus::Received
        }
    }
}

/// Complete replacement for the four editable fields of an active asset.
///
/// Edits are all-or-nothing: every field must be present and non-empty, so a
/// partial patch is rejected at construction rather than merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPatch {
    name: AssetName,
    asset_code: String,
    branch: BranchName,
    serial_number: String,
}

impl AssetPatch {
    /// Validate and construct a patch from raw field values.
    pub fn try_new(
        asset_name: impl AsRef<str>,
        asset_code: impl AsRef<str>,
        branch_name: impl AsRef<str>,
        serial_number: impl AsRef<str>,
    ) -> Result<Self, AssetValidationError> {
        let name = AssetName::new(asset_name)?;
        let branch = BranchName::new(branch_name)?;

        let code = asset_code.as_ref().trim();
        if code.is_empty() {
            return Err(AssetValidationError::EmptyAssetCode);
        }
        let serial = serial_number.as_ref().trim();
        if serial.is_empty() {
            return Err(AssetValidationError::EmptySerialNumber);
        }

        Ok(Self {
            name,
            asset_code: code.to_owned(),
            branch,
            serial_number: serial.to_owned(),
        })
    }

    /// Replacement asset name.
    pub fn name(&self) -> &AssetName {
        &self.name
    }

    /// Replacement inventory code.
    pub fn asset_code(&self) -> &str {
        self.asset_code.as_str()
    }

    /// Replacement branch name.
    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Replacement serial number.
    pub fn serial_number(&self) -> &str {
        self.serial_number.as_str()
    }
}

#[cfg(test)]
mod tests;
