//! Raw form input, as collected from the web page or the command line.

use std::fmt;

/// The uploaded file as received: client-supplied name plus the full byte payload.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

/// Everything a user can submit. Nothing here is validated yet.
///
/// Blank strings and `None` are equivalent: both mean "left empty".
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub volume_path: Option<String>,
    pub document_type: Option<String>,
    pub business_area: Option<String>,
    pub geographic_scope: Option<String>,
    pub data_source: Option<String>,
    pub confidentiality: Option<String>,
    pub description: Option<String>,
    pub time_period: Option<String>,
    pub tags: Vec<String>,
    pub content_categories: Vec<String>,
    /// Identity of the submitter, when the surface knows it.
    pub uploaded_by: Option<String>,
}

/// Splits free-text tags on commas, dropping blanks and repeats.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_owned());
        }
    }
    tags
}

/// Inputs that must be present before an upload is attempted.
///
/// Declaration order is the order missing fields are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RequiredField {
    File,
    VolumePath,
    DocumentType,
    BusinessArea,
    GeographicScope,
    DataSource,
    Confidentiality,
    Description,
}

impl RequiredField {
    pub const ALL: [RequiredField; 8] = [
        RequiredField::File,
        RequiredField::VolumePath,
        RequiredField::DocumentType,
        RequiredField::BusinessArea,
        RequiredField::GeographicScope,
        RequiredField::DataSource,
        RequiredField::Confidentiality,
        RequiredField::Description,
    ];

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            RequiredField::File => "File",
            RequiredField::VolumePath => "Volume path",
            RequiredField::DocumentType => "Document type",
            RequiredField::BusinessArea => "Business area",
            RequiredField::GeographicScope => "Geographic scope",
            RequiredField::DataSource => "Data source",
            RequiredField::Confidentiality => "Confidentiality level",
            RequiredField::Description => "Brief description",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
