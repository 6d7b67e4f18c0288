//! Canonical UUID and short identifier types.

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Number of characters taken from a canonical UUID to form a [`ShortId`].
pub const SHORT_ID_LEN: usize = 8;

/// Intake's canonical UUID representation (32 lowercase hex characters, no hyphens).
///
/// Once you have a `UuidService`, you can assume the internal UUID is valid and in
/// canonical form.
///
/// # Construction
/// - [`UuidService::new`] generates a new random (v4) UUID.
/// - [`UuidService::parse`] validates an externally supplied identifier.
///
/// # Display format
/// Always the canonical 32-character lowercase hex format without hyphens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UuidService(Uuid);

impl Default for UuidService {
    fn default() -> Self {
        Self::new()
    }
}

impl UuidService {
    /// Generates a new UUID in canonical form (RFC 4122 version 4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses a UUID string that must already be in canonical form.
    ///
    /// Hyphenated or uppercase forms are **not** normalised.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "UUID must be 32 lowercase hex characters without hyphens, got: '{}'",
                input
            )));
        }

        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(format!("'{}': {}", input, e)))
    }

    /// Returns true if `input` is in canonical UUID form.
    ///
    /// Purely syntactic: exactly 32 bytes, only `0-9` and `a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Returns the first [`SHORT_ID_LEN`] characters of the canonical form.
    pub fn short(&self) -> ShortId {
        let canonical = self.0.simple().to_string();
        ShortId(canonical[..SHORT_ID_LEN].to_owned())
    }
}

impl fmt::Display for UuidService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for UuidService {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UuidService::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UuidService {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// An 8-character lowercase hex identifier taken from a fresh random UUID.
///
/// Short ids are not globally unique on their own. They only need to separate uploads
/// that share both an original filename and a one-second timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShortId(String);

impl ShortId {
    /// Generates a new short id from a fresh random UUID.
    pub fn generate() -> Self {
        UuidService::new().short()
    }

    /// Validates an externally supplied short id (8 lowercase hex characters).
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not 8 lowercase hex characters.
    pub fn parse(input: &str) -> UuidResult<Self> {
        let valid = input.len() == SHORT_ID_LEN
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if valid {
            Ok(Self(input.to_owned()))
        } else {
            Err(UuidError::InvalidInput(format!(
                "short id must be {} lowercase hex characters, got: '{}'",
                SHORT_ID_LEN, input
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
