//! Required-field presence checks.
//!
//! This is a presence gate, not a schema validator: any non-blank value passes.

use crate::error::MissingFieldError;
use crate::form::{RequiredField, UploadForm};
use intake_files::StoredFilename;
use intake_types::NonEmptyText;

/// Descriptive fields that survived the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptiveFields {
    pub document_type: NonEmptyText,
    pub business_area: NonEmptyText,
    pub geographic_scope: NonEmptyText,
    pub data_source: NonEmptyText,
    pub confidentiality: NonEmptyText,
    pub description: NonEmptyText,
    pub time_period: Option<NonEmptyText>,
    pub tags: Vec<String>,
    pub content_categories: Vec<String>,
    pub uploaded_by: Option<NonEmptyText>,
}

/// A submission with every required input present.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub bytes: Vec<u8>,
    /// Final path component of the client-supplied filename.
    pub original_filename: String,
    /// Raw volume path text; parsed in the next stage.
    pub volume_path: NonEmptyText,
    pub fields: DescriptiveFields,
}

/// Checks that every [`RequiredField`] is present.
///
/// A file whose name has no usable final component counts as missing.
///
/// # Errors
///
/// Returns a single [`MissingFieldError`] naming every missing field.
pub fn validate(form: UploadForm) -> Result<ValidatedUpload, MissingFieldError> {
    let mut missing = Vec::new();

    let file = form.file.and_then(|file| {
        StoredFilename::sanitise_original(&file.filename)
            .ok()
            .map(|name| (name, file.bytes))
    });
    if file.is_none() {
        missing.push(RequiredField::File);
    }

    let mut require = |field: RequiredField, value: Option<String>| {
        let text = NonEmptyText::from_optional(value);
        if text.is_none() {
            missing.push(field);
        }
        text
    };

    let volume_path = require(RequiredField::VolumePath, form.volume_path);
    let document_type = require(RequiredField::DocumentType, form.document_type);
    let business_area = require(RequiredField::BusinessArea, form.business_area);
    let geographic_scope = require(RequiredField::GeographicScope, form.geographic_scope);
    let data_source = require(RequiredField::DataSource, form.data_source);
    let confidentiality = require(RequiredField::Confidentiality, form.confidentiality);
    let description = require(RequiredField::Description, form.description);

    let (
        Some((original_filename, bytes)),
        Some(volume_path),
        Some(document_type),
        Some(business_area),
        Some(geographic_scope),
        Some(data_source),
        Some(confidentiality),
        Some(description),
    ) = (
        file,
        volume_path,
        document_type,
        business_area,
        geographic_scope,
        data_source,
        confidentiality,
        description,
    )
    else {
        return Err(MissingFieldError::new(missing));
    };

    Ok(ValidatedUpload {
        bytes,
        original_filename,
        volume_path,
        fields: DescriptiveFields {
            document_type,
            business_area,
            geographic_scope,
            data_source,
            confidentiality,
            description,
            time_period: NonEmptyText::from_optional(form.time_period),
            tags: clean_list(form.tags),
            content_categories: clean_list(form.content_categories),
            uploaded_by: NonEmptyText::from_optional(form.uploaded_by),
        },
    })
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_owned());
        }
    }
    out
}
