//! Authentication primitives: login credentials and password digests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use tracker::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("frontdesk", "hunter2").unwrap();
/// assert_eq!(creds.username(), "frontdesk");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// SHA-256 digest of a password, stored as lowercase hex.
///
/// The store never keeps plaintext passwords; sign-up and profile edits
/// digest the password immediately and persist only the hex form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a plaintext password.
    pub fn from_password(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        Self(hex::encode(digest))
    }

    /// Wrap an already-stored hex digest without re-hashing.
    ///
    /// Intended for persistence adapters reading rows back; no format
    /// validation is applied beyond what the adapter stored.
    #[must_use]
    pub fn from_stored(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Whether the given plaintext password matches this digest.
    pub fn matches(&self, password: &str) -> bool {
        Self::from_password(password) == *self
    }

    /// The stored hex form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "secret", CredentialsValidationError::EmptyUsername)]
    #[case("   ", "secret", CredentialsValidationError::EmptyUsername)]
    #[case("frontdesk", "", CredentialsValidationError::EmptyPassword)]
    fn credentials_reject_blank_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        assert_eq!(
            Credentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn credentials_trim_the_username_only() {
        let creds = Credentials::try_from_parts("  frontdesk  ", " secret ")
            .expect("valid credentials");
        assert_eq!(creds.username(), "frontdesk");
        assert_eq!(creds.password(), " secret ");
    }

    #[rstest]
    fn digest_matches_the_original_password() {
        let digest = PasswordDigest::from_password("correct horse");
        assert!(digest.matches("correct horse"));
        assert!(!digest.matches("wrong pony"));
    }

    #[rstest]
    fn digest_is_lowercase_hex_of_fixed_width() {
        let digest = PasswordDigest::from_password("secret");
        assert_eq!(digest.as_str().len(), 64);
        assert!(
            digest
                .as_str()
                .chars()
                .all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase())
        );
    }

    #[rstest]
    fn stored_digests_round_trip() {
        let digest = PasswordDigest::from_password("secret");
        let restored = PasswordDigest::from_stored(digest.as_str());
        assert_eq!(restored, digest);
    }
}
