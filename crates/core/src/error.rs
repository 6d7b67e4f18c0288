use crate::constants::VOLUME_PATH_FORMAT;
use crate::form::RequiredField;
use intake_files::StorageError;

/// One or more required inputs were absent.
///
/// Lists every missing field, in [`RequiredField::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please fill in all required fields: {}", join_labels(.missing))]
pub struct MissingFieldError {
    missing: Vec<RequiredField>,
}

fn join_labels(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl MissingFieldError {
    /// Returns `None` when nothing is missing.
    pub fn from_fields(missing: Vec<RequiredField>) -> Option<Self> {
        if missing.is_empty() {
            return None;
        }
        Some(Self::new(missing))
    }

    pub(crate) fn new(mut missing: Vec<RequiredField>) -> Self {
        missing.sort();
        missing.dedup();
        Self { missing }
    }

    pub fn missing(&self) -> &[RequiredField] {
        &self.missing
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.missing.iter().map(|f| f.label()).collect()
    }
}

/// The destination path did not split into three non-empty, separator-free parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid volume path '{input}': expected format {}", VOLUME_PATH_FORMAT)]
pub struct MalformedPathError {
    input: String,
}

impl MalformedPathError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// The storage client rejected the upload.
///
/// The storage message is carried verbatim in `source`.
#[derive(Debug, thiserror::Error)]
#[error("Upload to {path} failed: {source}")]
pub struct UploadError {
    pub path: String,
    pub source: StorageError,
}

impl UploadError {
    /// A next step for the user, chosen by failure mode.
    pub fn hint(&self) -> &'static str {
        match self.source {
            StorageError::PermissionDenied(_) => {
                "Check that you have WRITE VOLUME permission on this volume."
            }
            StorageError::NotFound(_) => {
                "Check that the catalog, schema and volume exist and that you can see them."
            }
            StorageError::Transport(_) => {
                "The storage service could not be reached. Check the workspace host and try again."
            }
            _ => "Check your permissions and the volume path.",
        }
    }
}

/// Everything that can end a submission in the Failed state.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    MissingFields(#[from] MissingFieldError),

    #[error("File is too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: usize, limit: usize },

    #[error(transparent)]
    MalformedPath(#[from] MalformedPathError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl WorkflowError {
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            WorkflowError::Upload(e) => Some(e.hint()),
            WorkflowError::MalformedPath(_) => Some("Use the form catalog.schema.volume_name."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_error_lists_labels_in_order() {
        let err = MissingFieldError::from_fields(vec![
            RequiredField::Description,
            RequiredField::File,
            RequiredField::BusinessArea,
        ])
        .unwrap();

        assert_eq!(err.labels(), vec!["File", "Business area", "Brief description"]);
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: File, Business area, Brief description"
        );
    }

    #[test]
    fn test_missing_field_error_none_when_empty() {
        assert!(MissingFieldError::from_fields(Vec::new()).is_none());
    }

    #[test]
    fn test_upload_error_keeps_storage_message_verbatim() {
        let err = UploadError {
            path: "/Volumes/a/b/c/x.txt".into(),
            source: StorageError::PermissionDenied("User lacks WRITE VOLUME".into()),
        };

        assert_eq!(
            err.to_string(),
            "Upload to /Volumes/a/b/c/x.txt failed: permission denied: User lacks WRITE VOLUME"
        );
        assert!(err.hint().contains("WRITE VOLUME"));
    }

    #[test]
    fn test_generic_hint_for_other_failures() {
        let err = WorkflowError::from(UploadError {
            path: "/Volumes/a/b/c/x.txt".into(),
            source: StorageError::Api {
                status: 500,
                code: None,
                message: "boom".into(),
            },
        });

        assert_eq!(err.hint(), Some("Check your permissions and the volume path."));
    }
}
