//! User account services: sign-up, authentication, and profile edits.
//!
//! The asset core depends on these operations as a black box providing
//! existence checks, credential verification, and signature lookups; the
//! presentation collaborator drives them directly for login and profile
//! dialogs.

use std::sync::Arc;

use tracing::info;

use crate::domain::auth::{Credentials, PasswordDigest};
use crate::domain::error::DomainError;
use crate::domain::ports::{
    ProfileChanges, ProfileUpdate, SignUpOutcome, UserRepository, UserRepositoryError,
};
use crate::domain::user::{SignaturePath, User, UserId, Username};

fn map_repository_error(error: UserRepositoryError) -> DomainError {
    match error {
        UserRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            DomainError::internal(format!("user store error: {message}"))
        }
    }
}

const BAD_CREDENTIALS: &str = "invalid username or password";

/// Sign-up payload; every field is required.
#[derive(Debug, Clone)]
pub struct SignUp {
    /// Requested login name.
    pub username: String,
    /// Plaintext password, digested before persistence.
    pub password: String,
    /// Signature image reference captured by the collaborator.
    pub signature_path: String,
}

/// Partial profile changes; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    /// Replacement login name.
    pub username: Option<String>,
    /// Replacement plaintext password, digested before persistence.
    pub password: Option<String>,
    /// Replacement signature image reference.
    pub signature_path: Option<String>,
}

/// Read model for the profile dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Current login name.
    pub username: Username,
    /// Signature reference on file, if any.
    pub signature: Option<SignaturePath>,
}

/// User account service.
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service over a user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Create a new account and return its identifier.
    pub fn sign_up(&self, request: SignUp) -> Result<UserId, DomainError> {
        let username = Username::new(&request.username)
            .map_err(|err| DomainError::validation(err.to_string()))?;
        if request.password.is_empty() {
            return Err(DomainError::validation("password must not be empty"));
        }
        let signature = SignaturePath::new(request.signature_path)
            .map_err(|err| DomainError::validation(err.to_string()))?;

        let user = User::new(
            UserId::random(),
            username.clone(),
            PasswordDigest::from_password(&request.password),
            Some(signature),
        );

        match self.users.insert(&user).map_err(map_repository_error)? {
            SignUpOutcome::Created => {
                info!(username = %username, "user account created");
                Ok(*user.id())
            }
            SignUpOutcome::UsernameTaken => Err(DomainError::already_exists(format!(
                "username {username} is already taken"
            ))),
        }
    }

    /// Verify credentials and return the matching account.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<User, DomainError> {
        let username = Username::new(credentials.username())
            .map_err(|_| DomainError::unauthorized(BAD_CREDENTIALS))?;

        let user = self
            .users
            .find_by_username(&username)
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::unauthorized(BAD_CREDENTIALS))?;

        if !user.password().matches(credentials.password()) {
            return Err(DomainError::unauthorized(BAD_CREDENTIALS));
        }
        Ok(user)
    }

    /// Fetch the profile read model for an account.
    pub fn profile(&self, id: &UserId) -> Result<UserProfile, DomainError> {
        let user = self
            .users
            .find_by_id(id)
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("user {id} not found")))?;

        Ok(UserProfile {
            username: user.username().clone(),
            signature: user.signature().cloned(),
        })
    }

    /// Apply partial profile changes.
    ///
    /// An empty change set is rejected rather than silently accepted.
    pub fn update_profile(
        &self,
        id: &UserId,
        request: UpdateProfile,
    ) -> Result<(), DomainError> {
        let username = request
            .username
            .map(|value| Username::new(value))
            .transpose()
            .map_err(|err| DomainError::validation(err.to_string()))?;
        let password = match request.password {
            Some(value) if value.is_empty() => {
                return Err(DomainError::validation("password must not be empty"));
            }
            Some(value) => Some(PasswordDigest::from_password(&value)),
            None => None,
        };
        let signature = request
            .signature_path
            .map(SignaturePath::new)
            .transpose()
            .map_err(|err| DomainError::validation(err.to_string()))?;

        let changes = ProfileChanges {
            username,
            password,
            signature,
        };
        if changes.is_empty() {
            return Err(DomainError::validation("no changes provided"));
        }

        match self
            .users
            .update_profile(id, &changes)
            .map_err(map_repository_error)?
        {
            ProfileUpdate::Applied => {
                info!(user = %id, "profile updated");
                Ok(())
            }
            ProfileUpdate::Missing => {
                Err(DomainError::not_found(format!("user {id} not found")))
            }
            ProfileUpdate::UsernameTaken => Err(DomainError::already_exists(
                "username is already taken by another account",
            )),
        }
    }

    /// The signature reference on file for an account, if any.
    ///
    /// An unknown account reads as no signature, mirroring the directory
    /// port's semantics.
    pub fn signature_path(&self, id: &UserId) -> Result<Option<SignaturePath>, DomainError> {
        let user = self.users.find_by_id(id).map_err(map_repository_error)?;
        Ok(user.and_then(|u| u.signature().cloned()))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
