//! Domain ports and supporting types for the hexagonal boundary.

mod asset_repository;
mod signature_directory;
mod user_repository;

#[cfg(test)]
pub use asset_repository::MockAssetRepository;
pub use asset_repository::{
    AssetRepository, AssetRepositoryError, FixtureAssetRepository, InsertOutcome, LifecycleUpdate,
};
#[cfg(test)]
pub use signature_directory::MockSignatureDirectory;
pub use signature_directory::{
    FixtureSignatureDirectory, SignatureDirectory, SignatureDirectoryError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    FixtureUserRepository, ProfileChanges, ProfileUpdate, SignUpOutcome, UserRepository,
    UserRepositoryError,
};
