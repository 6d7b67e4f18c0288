//! The single-submission upload workflow.
//!
//! ```text
//! Idle → Validating → Parsing → Minting → Uploading → Done
//!            │           │          │          │
//!            └───────────┴──────────┴──────────┴──→ Failed
//! ```
//!
//! Each submission starts from `Idle`; nothing carries over between runs.

use crate::config::CoreConfig;
use crate::error::{MissingFieldError, UploadError, WorkflowError};
use crate::form::{RequiredField, UploadForm};
use crate::metadata::MetadataRecord;
use crate::schema::SqlSuggestion;
use crate::validation;
use crate::volume_path::VolumePath;
use chrono::{DateTime, Utc};
use intake_files::{Sha256Hash, StoredFilename, VolumeClient};
use std::fmt;
use std::sync::Arc;

/// Stage of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Validating,
    Parsing,
    Minting,
    Uploading,
    Done,
    Failed,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Validating => "validating",
            WorkflowState::Parsing => "parsing",
            WorkflowState::Minting => "minting",
            WorkflowState::Uploading => "uploading",
            WorkflowState::Done => "done",
            WorkflowState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What a successful submission produced.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub volume: VolumePath,
    /// Absolute `/Volumes/...` path the bytes were written to.
    pub file_path: String,
    pub metadata: MetadataRecord,
    pub sql: SqlSuggestion,
}

/// Terminal result of one submission.
#[derive(Debug)]
pub enum WorkflowOutcome {
    Done(UploadReceipt),
    Failed {
        /// The stage that was running when the submission failed.
        stage: WorkflowState,
        error: WorkflowError,
    },
}

impl WorkflowOutcome {
    /// Always [`WorkflowState::Done`] or [`WorkflowState::Failed`].
    pub fn state(&self) -> WorkflowState {
        match self {
            WorkflowOutcome::Done(_) => WorkflowState::Done,
            WorkflowOutcome::Failed { .. } => WorkflowState::Failed,
        }
    }

    pub fn receipt(&self) -> Option<&UploadReceipt> {
        match self {
            WorkflowOutcome::Done(receipt) => Some(receipt),
            WorkflowOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            WorkflowOutcome::Done(_) => None,
            WorkflowOutcome::Failed { error, .. } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<UploadReceipt, WorkflowError> {
        match self {
            WorkflowOutcome::Done(receipt) => Ok(receipt),
            WorkflowOutcome::Failed { error, .. } => Err(error),
        }
    }
}

/// Runs submissions against one injected [`VolumeClient`].
///
/// Cheap to clone; clones share the client.
#[derive(Clone)]
pub struct UploadWorkflow {
    client: Arc<dyn VolumeClient>,
    config: CoreConfig,
}

impl UploadWorkflow {
    pub fn new(client: Arc<dyn VolumeClient>, config: CoreConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &'static str {
        self.client.backend_name()
    }

    /// Runs one submission using the current time.
    ///
    /// Blocks for the duration of the upload.
    pub fn run(&self, form: UploadForm) -> WorkflowOutcome {
        self.run_at(form, Utc::now())
    }

    /// Runs one submission as if it happened at `now`.
    pub fn run_at(&self, form: UploadForm, now: DateTime<Utc>) -> WorkflowOutcome {
        let mut stage = WorkflowState::Idle;

        match self.execute(form, now, &mut stage) {
            Ok(receipt) => {
                tracing::info!(
                    path = %receipt.file_path,
                    document_id = %receipt.metadata.document_id,
                    bytes = receipt.metadata.file_size_bytes,
                    "upload complete"
                );
                WorkflowOutcome::Done(receipt)
            }
            Err(error) => {
                tracing::warn!(%stage, %error, "upload failed");
                WorkflowOutcome::Failed { stage, error }
            }
        }
    }

    fn execute(
        &self,
        form: UploadForm,
        now: DateTime<Utc>,
        stage: &mut WorkflowState,
    ) -> Result<UploadReceipt, WorkflowError> {
        *stage = WorkflowState::Validating;
        tracing::debug!(%stage, "checking required fields");
        let validated = validation::validate(form)?;

        let limit = self.config.max_upload_bytes();
        if validated.bytes.len() > limit {
            return Err(WorkflowError::FileTooLarge {
                size: validated.bytes.len(),
                limit,
            });
        }

        *stage = WorkflowState::Parsing;
        tracing::debug!(%stage, input = validated.volume_path.as_str(), "parsing volume path");
        let volume = VolumePath::parse(validated.volume_path.as_str())?;

        *stage = WorkflowState::Minting;
        // The gate already reduced the filename to a usable basename.
        let stored = StoredFilename::mint(now, &validated.original_filename)
            .map_err(|_| MissingFieldError::new(vec![RequiredField::File]))?;
        let file_path = volume.file_path(&stored);
        let content_hash = Sha256Hash::compute(&validated.bytes);
        tracing::debug!(%stage, stored = %stored, hash = %content_hash, "minted stored filename");

        *stage = WorkflowState::Uploading;
        tracing::debug!(%stage, path = %file_path, bytes = validated.bytes.len(), "uploading");
        self.client
            .upload(&file_path, &validated.bytes, true)
            .map_err(|source| UploadError {
                path: file_path.clone(),
                source,
            })?;

        let metadata = MetadataRecord::assemble(
            validated.fields,
            &stored,
            file_path.clone(),
            content_hash,
            &validated.bytes,
            now,
        );
        let sql = SqlSuggestion::for_record(&metadata, &volume, &self.config);

        Ok(UploadReceipt {
            volume,
            file_path,
            metadata,
            sql,
        })
    }
}

impl fmt::Debug for UploadWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadWorkflow")
            .field("backend", &self.client.backend_name())
            .field("config", &self.config)
            .finish()
    }
}
