//! Intake file handling
//!
//! Everything that touches the uploaded bytes or the name they are stored under:
//!
//! - [`Sha256Hash`]: deterministic content hash used for dedup bookkeeping
//! - [`StoredFilename`]: collision-resistant `{timestamp}_{shortId}_{original}` names
//! - [`detect_media_type`]: best-effort MIME sniffing from magic bytes
//! - [`VolumeClient`]: the single upload capability the workflow consumes, with a
//!   filesystem-backed [`LocalVolumeClient`] for development and tests
//!
//! ## Destination layout
//!
//! ```text
//! /Volumes/
//! └── <catalog>/
//!     └── <schema>/
//!         └── <volume>/
//!             └── 20260118_143522_550e8400_quarterly-report.pdf
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use intake_files::{Sha256Hash, StoredFilename};
//!
//! let name = StoredFilename::mint(chrono::Utc::now(), "notes.txt").unwrap();
//! assert!(name.as_str().ends_with("_notes.txt"));
//!
//! let hash = Sha256Hash::compute(b"hello");
//! assert_eq!(hash, Sha256Hash::compute(b"hello"));
//! ```

mod constants;
mod hash;
mod local;
mod stored_name;
mod volume;

pub use constants::{STORED_TIMESTAMP_FORMAT, VOLUMES_ROOT};
pub use hash::Sha256Hash;
pub use local::LocalVolumeClient;
pub use stored_name::StoredFilename;
pub use volume::{StorageError, VolumeClient};

/// Errors that can occur while preparing a file for upload
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// The original filename was empty once directory components were removed
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

/// Detects the media type of `bytes` from their magic numbers.
///
/// Best-effort only; returns `None` for plain text and unknown formats.
pub fn detect_media_type(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|kind| kind.mime_type().to_owned())
}
