//! HTML rendering of the form page.

use crate::collect::CollectError;
use askama::Template;
use intake_core::constants::{
    BUSINESS_AREAS, CONFIDENTIALITY_LEVELS, CONTENT_CATEGORIES, DATA_SOURCES, DOCUMENT_TYPES,
    GEOGRAPHIC_SCOPES, VOLUME_PATH_FORMAT, VOLUME_PATH_PLACEHOLDER,
};
use intake_core::{UploadForm, UploadReceipt, WorkflowOutcome};

pub struct Choice {
    pub value: &'static str,
    pub selected: bool,
}

fn choices(options: &[&'static str], current: &str) -> Vec<Choice> {
    options
        .iter()
        .map(|&value| Choice {
            value,
            selected: value == current,
        })
        .collect()
}

fn checks(options: &[&'static str], current: &[String]) -> Vec<Choice> {
    options
        .iter()
        .map(|&value| Choice {
            value,
            selected: current.iter().any(|c| c.as_str() == value),
        })
        .collect()
}

pub struct Banner {
    /// `success` or `error`; used as a CSS class.
    pub kind: &'static str,
    pub message: String,
    pub hint: Option<String>,
}

pub struct FieldRow {
    pub name: &'static str,
    pub value: String,
}

pub struct Preview {
    pub file_path: String,
    pub rows: Vec<FieldRow>,
    pub json: String,
    pub sql: String,
}

impl Preview {
    fn from_receipt(receipt: &UploadReceipt) -> Self {
        let json = receipt.metadata.to_json_pretty().unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to serialise metadata preview");
            String::new()
        });

        Self {
            file_path: receipt.file_path.clone(),
            rows: receipt
                .metadata
                .fields()
                .into_iter()
                .map(|(name, value)| FieldRow { name, value })
                .collect(),
            json,
            sql: receipt.sql.to_script(),
        }
    }
}

/// Text values echoed back into the form after a failed submission.
///
/// The file itself is never echoed; browsers do not allow prefilling file inputs.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub volume_path: String,
    pub document_type: String,
    pub business_area: String,
    pub geographic_scope: String,
    pub data_source: String,
    pub confidentiality: String,
    pub description: String,
    pub time_period: String,
    pub tags: String,
    pub content_categories: Vec<String>,
}

impl FormValues {
    pub fn from_form(form: &UploadForm) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            volume_path: text(&form.volume_path),
            document_type: text(&form.document_type),
            business_area: text(&form.business_area),
            geographic_scope: text(&form.geographic_scope),
            data_source: text(&form.data_source),
            confidentiality: text(&form.confidentiality),
            description: text(&form.description),
            time_period: text(&form.time_period),
            tags: form.tags.join(", "),
            content_categories: form.content_categories.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub banner: Option<Banner>,
    pub values: FormValues,
    pub volume_placeholder: &'static str,
    pub volume_format: &'static str,
    pub document_types: Vec<Choice>,
    pub business_areas: Vec<Choice>,
    pub geographic_scopes: Vec<Choice>,
    pub data_sources: Vec<Choice>,
    pub confidentiality_levels: Vec<Choice>,
    pub content_categories: Vec<Choice>,
    pub preview: Option<Preview>,
}

impl IndexPage {
    /// An empty form.
    pub fn blank() -> Self {
        Self::with_values(FormValues::default())
    }

    fn with_values(values: FormValues) -> Self {
        Self {
            volume_placeholder: VOLUME_PATH_PLACEHOLDER,
            volume_format: VOLUME_PATH_FORMAT,
            document_types: choices(DOCUMENT_TYPES, &values.document_type),
            business_areas: choices(BUSINESS_AREAS, &values.business_area),
            geographic_scopes: choices(GEOGRAPHIC_SCOPES, &values.geographic_scope),
            data_sources: choices(DATA_SOURCES, &values.data_source),
            confidentiality_levels: choices(CONFIDENTIALITY_LEVELS, &values.confidentiality),
            content_categories: checks(CONTENT_CATEGORIES, &values.content_categories),
            values,
            banner: None,
            preview: None,
        }
    }

    /// The page after a submission ran. Failed submissions keep what the user typed.
    pub fn from_outcome(outcome: &WorkflowOutcome, submitted: FormValues) -> Self {
        match outcome {
            WorkflowOutcome::Done(receipt) => Self {
                banner: Some(Banner {
                    kind: "success",
                    message: format!("File uploaded successfully to {}", receipt.file_path),
                    hint: None,
                }),
                preview: Some(Preview::from_receipt(receipt)),
                ..Self::blank()
            },
            WorkflowOutcome::Failed { error, .. } => Self {
                banner: Some(Banner {
                    kind: "error",
                    message: error.to_string(),
                    hint: error.hint().map(str::to_owned),
                }),
                ..Self::with_values(submitted)
            },
        }
    }

    /// The page when the request body could not be read at all.
    pub fn collect_failed(err: &CollectError) -> Self {
        Self {
            banner: Some(Banner {
                kind: "error",
                message: err.to_string(),
                hint: None,
            }),
            ..Self::blank()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_page_renders_all_options() {
        let html = IndexPage::blank().render().unwrap();

        assert!(html.contains("File Upload to UC Volume"));
        assert!(html.contains(VOLUME_PATH_PLACEHOLDER));
        for option in DOCUMENT_TYPES.iter().chain(CONFIDENTIALITY_LEVELS) {
            assert!(html.contains(&format!("value=\"{option}\"")), "{option}");
        }
        assert!(!html.contains("class=\"banner"));
    }

    #[test]
    fn test_submitted_values_are_echoed_and_escaped() {
        let values = FormValues {
            document_type: "Policy".into(),
            description: "<script>alert(1)</script>".into(),
            content_categories: vec!["Strategy".into()],
            ..FormValues::default()
        };
        let html = IndexPage::with_values(values).render().unwrap();

        assert!(html.contains("<option value=\"Policy\" selected>"));
        assert!(html.contains("value=\"Strategy\" checked"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_collect_failure_banner() {
        let html = IndexPage::collect_failed(&CollectError::TooLarge { limit: 10 })
            .render()
            .unwrap();

        assert!(html.contains("class=\"banner error\""));
        assert!(html.contains("larger than the 10 byte limit"));
    }
}
