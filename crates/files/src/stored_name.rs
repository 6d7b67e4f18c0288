//! Stored filename minting.
//!
//! A stored filename has the form `{timestamp}_{shortId}_{originalFilename}`:
//!
//! - `timestamp` is [`STORED_TIMESTAMP_FORMAT`] in UTC (e.g. `20260118_143522`)
//! - `shortId` is the first 8 hex characters of a fresh random UUID
//! - `originalFilename` is the final path component of the name the user supplied
//!
//! Two uploads of `report.pdf` in the same second still land on different objects
//! unless their short ids collide (one in 2^32).

use crate::{FilesError, STORED_TIMESTAMP_FORMAT};
use chrono::{DateTime, Utc};
use intake_uuid::ShortId;
use std::fmt;

/// Collision-resistant name under which an upload is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFilename {
    name: String,
    short_id: ShortId,
    original: String,
}

impl StoredFilename {
    /// Mints a stored filename for `original` at `now` with a fresh short id.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidFilename`] if `original` has no usable final component.
    pub fn mint(now: DateTime<Utc>, original: &str) -> Result<Self, FilesError> {
        Self::compose(now, ShortId::generate(), original)
    }

    /// Builds a stored filename from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidFilename`] if `original` has no usable final component.
    pub fn compose(
        now: DateTime<Utc>,
        short_id: ShortId,
        original: &str,
    ) -> Result<Self, FilesError> {
        let original = Self::sanitise_original(original)?;
        let name = format!(
            "{}_{}_{}",
            now.format(STORED_TIMESTAMP_FORMAT),
            short_id,
            original
        );

        Ok(Self {
            name,
            short_id,
            original,
        })
    }

    /// Reduces a user-supplied filename to its final path component.
    ///
    /// Browsers on some platforms send full client paths (`C:\Users\a\report.pdf`);
    /// only `report.pdf` may reach the volume path.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidFilename`] if nothing usable remains.
    pub fn sanitise_original(raw: &str) -> Result<String, FilesError> {
        let base = raw
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default()
            .trim();

        if base.is_empty() || base == "." || base == ".." {
            return Err(FilesError::InvalidFilename(raw.to_owned()));
        }

        Ok(base.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn short_id(&self) -> &ShortId {
        &self.short_id
    }

    /// The sanitised original filename embedded in this name.
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for StoredFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for StoredFilename {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
