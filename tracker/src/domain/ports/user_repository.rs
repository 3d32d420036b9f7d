//! Port for user account persistence.

use crate::domain::auth::PasswordDigest;
use crate::domain::user::{SignaturePath, User, UserId, Username};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl UserRepositoryError {
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

/// Result of inserting a new user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The account was persisted.
    Created,
    /// Another account already holds the username.
    UsernameTaken,
}

/// Result of a profile update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileUpdate {
    /// The changes were applied.
    Applied,
    /// No account carries the identifier.
    Missing,
    /// The requested username belongs to another account.
    UsernameTaken,
}

/// Partial profile changes; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    /// Replacement username, if changing.
    pub username: Option<Username>,
    /// Replacement credential digest, if changing.
    pub password: Option<PasswordDigest>,
    /// Replacement signature reference, if changing.
    pub signature: Option<SignaturePath>,
}

impl ProfileChanges {
    /// Whether the change set touches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.signature.is_none()
    }
}

/// Port for writing and reading user accounts.
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Persist a new user account.
    fn insert(&self, user: &User) -> Result<SignUpOutcome, UserRepositoryError>;

    /// Find an account by username.
    fn find_by_username(&self, username: &Username)
    -> Result<Option<User>, UserRepositoryError>;

    /// Find an account by identifier.
    fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Apply partial profile changes as one atomic unit.
    fn update_profile(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<ProfileUpdate, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

impl UserRepository for FixtureUserRepository {
    fn insert(&self, _user: &User) -> Result<SignUpOutcome, UserRepositoryError> {
        Ok(SignUpOutcome::Created)
    }

    fn find_by_username(
        &self,
        _username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    fn update_profile(
        &self,
        _id: &UserId,
        _changes: &ProfileChanges,
    ) -> Result<ProfileUpdate, UserRepositoryError> {
        Ok(ProfileUpdate::Missing)
    }
}
