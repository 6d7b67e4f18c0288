//! The descriptive record assembled for each successful upload.
//!
//! The record is rendered to the user and offered as an `INSERT` suggestion. This program
//! never writes it anywhere.

use crate::validation::DescriptiveFields;
use chrono::{DateTime, SecondsFormat, Utc};
use intake_files::{Sha256Hash, StoredFilename};
use intake_types::NonEmptyText;
use intake_uuid::UuidService;
use std::fmt;

/// Downstream processing state. Always `pending` when a record is created here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Pending,
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingStatus::Pending => f.write_str("pending"),
        }
    }
}

/// Flat set of descriptive fields for one uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MetadataRecord {
    pub document_id: UuidService,
    pub original_filename: String,
    pub stored_filename: String,
    pub volume_path: String,
    pub file_size_bytes: u64,
    pub content_hash: Sha256Hash,
    pub media_type: Option<String>,
    pub document_type: NonEmptyText,
    pub business_area: NonEmptyText,
    pub geographic_scope: NonEmptyText,
    pub data_source: NonEmptyText,
    pub confidentiality_level: NonEmptyText,
    pub description: NonEmptyText,
    pub time_period: Option<NonEmptyText>,
    pub tags: Vec<String>,
    pub content_categories: Vec<String>,
    pub uploaded_by: Option<NonEmptyText>,
    pub upload_timestamp: DateTime<Utc>,
    pub processing_status: ProcessingStatus,
}

impl MetadataRecord {
    /// Assembles the record for a stored upload.
    ///
    /// `content_hash` is the digest taken of `bytes` when the stored name was minted.
    pub fn assemble(
        fields: DescriptiveFields,
        stored: &StoredFilename,
        volume_path: String,
        content_hash: Sha256Hash,
        bytes: &[u8],
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            document_id: UuidService::new(),
            original_filename: stored.original().to_owned(),
            stored_filename: stored.as_str().to_owned(),
            volume_path,
            file_size_bytes: bytes.len() as u64,
            content_hash,
            media_type: intake_files::detect_media_type(bytes),
            document_type: fields.document_type,
            business_area: fields.business_area,
            geographic_scope: fields.geographic_scope,
            data_source: fields.data_source,
            confidentiality_level: fields.confidentiality,
            description: fields.description,
            time_period: fields.time_period,
            tags: fields.tags,
            content_categories: fields.content_categories,
            uploaded_by: fields.uploaded_by,
            upload_timestamp: uploaded_at,
            processing_status: ProcessingStatus::Pending,
        }
    }

    /// Field name → display value, in column order. Absent optionals render as empty.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let opt = |v: &Option<NonEmptyText>| v.as_ref().map(|t| t.to_string()).unwrap_or_default();

        vec![
            ("document_id", self.document_id.to_string()),
            ("original_filename", self.original_filename.clone()),
            ("stored_filename", self.stored_filename.clone()),
            ("volume_path", self.volume_path.clone()),
            ("file_size_bytes", self.file_size_bytes.to_string()),
            ("content_hash", self.content_hash.to_string()),
            ("media_type", self.media_type.clone().unwrap_or_default()),
            ("document_type", self.document_type.to_string()),
            ("business_area", self.business_area.to_string()),
            ("geographic_scope", self.geographic_scope.to_string()),
            ("data_source", self.data_source.to_string()),
            ("confidentiality_level", self.confidentiality_level.to_string()),
            ("description", self.description.to_string()),
            ("time_period", opt(&self.time_period)),
            ("tags", self.tags.join(", ")),
            ("content_categories", self.content_categories.join(", ")),
            ("uploaded_by", opt(&self.uploaded_by)),
            (
                "upload_timestamp",
                self.upload_timestamp
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("processing_status", self.processing_status.to_string()),
        ]
    }

    /// # Errors
    ///
    /// Returns the `serde_json` error if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
