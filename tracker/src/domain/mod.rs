//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define strongly typed records used by the persistence layer and
//! the presentation collaborator. Keep types immutable and document
//! invariants in each type's Rustdoc. Ports (repository traits) mark the
//! hexagonal boundary; services own the lifecycle policy.

pub mod asset;
mod asset_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod search;
pub mod user;
mod user_service;

pub use self::asset::{
    Asset, AssetDraft, AssetName, AssetPatch, AssetStatus, AssetValidationError, BranchName,
    DispatchRecord,
};
pub use self::asset_service::{AssetService, EditAsset, ReceiveAsset};
pub use self::auth::{Credentials, CredentialsValidationError, PasswordDigest};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::search::{
    AssetSearch, LifecycleScope, SearchField, SearchTerm, SearchValidationError,
};
pub use self::user::{SignaturePath, User, UserId, UserValidationError, Username};
pub use self::user_service::{SignUp, UpdateProfile, UserProfile, UserService};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use tracker::domain::{DomainError, DomainResult};
///
/// fn guard(ready: bool) -> DomainResult<()> {
///     if ready {
///         Ok(())
///     } else {
///         Err(DomainError::invalid_state("not ready"))
///     }
/// }
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
