//! # Intake Core
//!
//! Business logic for uploading a document into a Unity Catalog volume and describing it.
//!
//! One submission runs the [`UploadWorkflow`] start to finish:
//!
//! 1. collect the form ([`UploadForm`])
//! 2. check required fields ([`validation::validate`])
//! 3. parse `catalog.schema.volume` ([`VolumePath`])
//! 4. mint a stored filename and hash the bytes
//! 5. upload through the injected [`VolumeClient`](intake_files::VolumeClient)
//!
//! The result is a [`WorkflowOutcome`] value. Rendering it (HTML, terminal) belongs in
//! `intake-web` and `intake-cli`; nothing here writes to a UI.

pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod metadata;
pub mod schema;
pub mod storage;
pub mod validation;
pub mod volume_path;
pub mod workflow;

pub use config::{ConfigError, CoreConfig, IntakeSettings, StorageConfig};
pub use error::{MalformedPathError, MissingFieldError, UploadError, WorkflowError};
pub use form::{RequiredField, UploadForm, UploadedFile};
pub use metadata::{MetadataRecord, ProcessingStatus};
pub use schema::SqlSuggestion;
pub use storage::build_volume_client;
pub use volume_path::VolumePath;
pub use workflow::{UploadReceipt, UploadWorkflow, WorkflowOutcome, WorkflowState};
