//! Tracking identifier primitives for asset records.
//!
//! A tracking code is the human-meaningful key printed on receipts and read
//! back over the phone: a constant `PNP-` prefix followed by six characters
//! drawn from uppercase letters and digits. The code is assigned once at
//! receipt and never changes for the lifetime of the record.
//!
//! This crate owns the format ([`TrackingCode`]) and the minting primitive
//! ([`mint`]), which retries random candidates against a caller-supplied
//! collision probe until it finds a free code. It is deliberately independent
//! of the storage layer: the probe is just a fallible predicate, so the same
//! minting logic serves a database-backed store and an in-memory test double.
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//! use std::convert::Infallible;
//!
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use tracking_code::{TrackingCode, mint};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let issued: HashSet<TrackingCode> = HashSet::new();
//! let code = mint(&mut rng, |candidate| {
//!     Ok::<bool, Infallible>(issued.contains(candidate))
//! })
//! .unwrap();
//! assert!(code.as_str().starts_with("PNP-"));
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Constant prefix carried by every tracking code.
pub const CODE_PREFIX: &str = "PNP-";

/// Number of random characters following the prefix.
pub const SUFFIX_LEN: usize = 6;

/// Upper bound on minting attempts before giving up.
///
/// The codespace (36^6) vastly exceeds realistic record counts, so this cap
/// exists only to turn a pathological probe into an error instead of a spin.
pub const MAX_MINT_ATTEMPTS: usize = 256;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Reasons a string is not a valid tracking code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackingCodeError {
    /// The value does not start with [`CODE_PREFIX`].
    #[error("tracking code must start with {CODE_PREFIX}")]
    MissingPrefix,
    /// The suffix is not exactly [`SUFFIX_LEN`] characters.
    #[error("tracking code suffix must be exactly {SUFFIX_LEN} characters")]
    WrongLength,
    /// The suffix contains a character outside `[A-Z0-9]`.
    #[error("tracking code may only contain uppercase letters and digits after the prefix")]
    InvalidCharacter,
}

/// Validated tracking identifier in the form `PNP-XXXXXX`.
///
/// ## Invariants
/// - Starts with [`CODE_PREFIX`].
/// - Exactly [`SUFFIX_LEN`] characters after the prefix, all from `[A-Z0-9]`.
///
/// Serialises as its string form and validates on deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingCode(String);

impl TrackingCode {
    /// Validate and construct a [`TrackingCode`] from borrowed input.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackingCodeError`] describing the first format rule the
    /// input breaks.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, TrackingCodeError> {
        Self::from_owned(value.as_ref().to_owned())
    }

    /// Draw a uniformly random, well-formed candidate code.
    ///
    /// Randomness alone does not guarantee uniqueness against persisted
    /// records; use [`mint`] for that.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut value = String::with_capacity(CODE_PREFIX.len() + SUFFIX_LEN);
        value.push_str(CODE_PREFIX);
        for _ in 0..SUFFIX_LEN {
            let byte = ALPHABET.choose(rng).copied().unwrap_or(b'A');
            value.push(char::from(byte));
        }
        Self(value)
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn from_owned(value: String) -> Result<Self, TrackingCodeError> {
        let suffix = value
            .strip_prefix(CODE_PREFIX)
            .ok_or(TrackingCodeError::MissingPrefix)?;
        if suffix.chars().count() != SUFFIX_LEN {
            return Err(TrackingCodeError::WrongLength);
        }
        if !suffix
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
        {
            return Err(TrackingCodeError::InvalidCharacter);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for TrackingCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingCode {
    type Err = TrackingCodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl From<TrackingCode> for String {
    fn from(value: TrackingCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for TrackingCode {
    type Error = TrackingCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Errors raised while minting a fresh tracking code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MintError<E> {
    /// Every candidate collided within [`MAX_MINT_ATTEMPTS`] attempts.
    #[error("no free tracking code found after {attempts} attempts")]
    Exhausted {
        /// Number of candidates tried before giving up.
        attempts: usize,
    },
    /// The collision probe itself failed.
    #[error("tracking code collision probe failed: {0}")]
    Probe(E),
}

/// Mint a tracking code that the `is_taken` probe reports as free.
///
/// Draws random candidates from `rng` and asks the probe about each one,
/// returning the first candidate the probe clears. The caller must persist
/// the returned code as one logical unit with the probe (or treat a
/// uniqueness violation on insert as a signal to mint again); the probe only
/// sees codes persisted before it ran.
///
/// # Errors
///
/// Returns [`MintError::Probe`] if the probe fails, or
/// [`MintError::Exhausted`] after [`MAX_MINT_ATTEMPTS`] collisions.
pub fn mint<R, F, E>(rng: &mut R, mut is_taken: F) -> Result<TrackingCode, MintError<E>>
where
    R: Rng + ?Sized,
    F: FnMut(&TrackingCode) -> Result<bool, E>,
{
    for _ in 0..MAX_MINT_ATTEMPTS {
        let candidate = TrackingCode::random(rng);
        if !is_taken(&candidate).map_err(MintError::Probe)? {
            return Ok(candidate);
        }
    }
    Err(MintError::Exhausted {
        attempts: MAX_MINT_ATTEMPTS,
    })
}
