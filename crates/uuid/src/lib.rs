//! Identifier utilities.
//!
//! Intake uses a *canonical* UUID representation for every generated identifier:
//! **32 lowercase hexadecimal characters** (no hyphens).
//!
//! This crate provides:
//! - [`UuidService`], a wrapper that guarantees the canonical format once constructed.
//! - [`ShortId`], the 8-character prefix of a fresh canonical UUID used to keep stored
//!   filenames apart when two uploads share an original name.
//!
//! ## Canonical UUID form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! This is the same value you would get from `Uuid::new_v4().simple().to_string()`.
//! Externally supplied identifiers must already be canonical; use [`UuidService::parse`].

mod service;

pub use service::{ShortId, Uuid, UuidService, SHORT_ID_LEN};

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
