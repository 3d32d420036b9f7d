//! Narrow port for signature reference lookups.
//!
//! Asset operations only need to know whether an acting user has a signature
//! on file; they never read or write accounts. Splitting this lookup from
//! the full user repository keeps the asset service's dependencies honest.

use crate::domain::user::{SignaturePath, UserId};

/// Errors raised by signature directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureDirectoryError {
    /// Directory connection could not be established.
    #[error("signature directory connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Lookup failed during execution.
    #[error("signature directory lookup failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl SignatureDirectoryError {
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

/// Port for resolving a user's signature reference.
///
/// `Ok(None)` covers both an unknown user and a user with no signature on
/// file; callers treat the two identically.
#[cfg_attr(test, mockall::automock)]
pub trait SignatureDirectory: Send + Sync {
    /// The signature reference on file for the given user, if any.
    fn signature_path(
        &self,
        user: &UserId,
    ) -> Result<Option<SignaturePath>, SignatureDirectoryError>;
}

/// Fixture implementation reporting no signatures on file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSignatureDirectory;

impl SignatureDirectory for FixtureSignatureDirectory {
    fn signature_path(
        &self,
        _user: &UserId,
    ) -> Result<Option<SignaturePath>, SignatureDirectoryError> {
        Ok(None)
    }
}
