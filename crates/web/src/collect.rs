//! Multipart field collection.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use intake_core::form::split_tags;
use intake_core::{UploadForm, UploadedFile};

/// Headers a fronting proxy sets with the signed-in user's identity, in preference order.
pub const IDENTITY_HEADERS: [&str; 2] = ["x-forwarded-email", "x-forwarded-preferred-username"];

/// The request body could not be read as a form.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("The upload is larger than the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("Could not read the submitted form: {0}")]
    Malformed(String),
}

impl CollectError {
    fn from_multipart(err: MultipartError, limit: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            CollectError::TooLarge { limit }
        } else {
            CollectError::Malformed(err.body_text())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CollectError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            CollectError::Malformed(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Reads every part of the submitted form into an [`UploadForm`].
///
/// Missing parts stay `None`; presence is judged later by the workflow. A file part with
/// an empty filename is what browsers send when nothing was chosen, and is treated as no
/// file. `limit` is only used to describe a body that exceeded the request limit.
///
/// # Errors
///
/// Returns [`CollectError`] if the body is not valid multipart data or is too large.
pub async fn collect_form(
    headers: &HeaderMap,
    mut multipart: Multipart,
    limit: usize,
) -> Result<UploadForm, CollectError> {
    let mut form = UploadForm {
        uploaded_by: identity_from_headers(headers),
        ..UploadForm::default()
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CollectError::from_multipart(e, limit))?
    {
        let name = field.name().unwrap_or_default().to_owned();

        if name == "file" {
            let filename = field.file_name().map(str::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| CollectError::from_multipart(e, limit))?;

            match filename {
                Some(filename) if !filename.trim().is_empty() => {
                    tracing::debug!(%filename, bytes = bytes.len(), "received file part");
                    form.file = Some(UploadedFile::new(filename, bytes.to_vec()));
                }
                _ => tracing::debug!("file part without a filename"),
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| CollectError::from_multipart(e, limit))?;

        match name.as_str() {
            "volume_path" => form.volume_path = Some(value),
            "document_type" => form.document_type = Some(value),
            "business_area" => form.business_area = Some(value),
            "geographic_scope" => form.geographic_scope = Some(value),
            "data_source" => form.data_source = Some(value),
            "confidentiality" => form.confidentiality = Some(value),
            "description" => form.description = Some(value),
            "time_period" => form.time_period = Some(value),
            "tags" => form.tags.extend(split_tags(&value)),
            "content_categories" => form.content_categories.push(value),
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn identity_from_headers(headers: &HeaderMap) -> Option<String> {
    IDENTITY_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_identity_prefers_email() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-preferred-username",
            HeaderValue::from_static("ana"),
        );
        headers.insert(
            "x-forwarded-email",
            HeaderValue::from_static("ana@example.com"),
        );

        assert_eq!(
            identity_from_headers(&headers).as_deref(),
            Some("ana@example.com")
        );
    }

    #[test]
    fn test_identity_falls_back_to_username() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-email", HeaderValue::from_static("  "));
        headers.insert(
            "x-forwarded-preferred-username",
            HeaderValue::from_static("ana"),
        );

        assert_eq!(identity_from_headers(&headers).as_deref(), Some("ana"));
    }

    #[test]
    fn test_no_identity_headers() {
        assert_eq!(identity_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_collect_error_status() {
        assert_eq!(
            CollectError::TooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            CollectError::Malformed("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
