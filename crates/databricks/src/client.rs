//! Blocking HTTP client for the Files API.

use crate::{DatabricksConfig, DatabricksError};
use intake_files::{StorageError, VolumeClient};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;

const FILES_API_PREFIX: &str = "/api/2.0/fs/files";

/// Error body returned by Databricks REST APIs.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    error_code: Option<String>,
    message: Option<String>,
}

/// Uploads files into Unity Catalog volumes through the Databricks Files API.
///
/// Blocking; construct, call and drop it outside of an async executor thread.
#[derive(Debug, Clone)]
pub struct FilesApiClient {
    http: Client,
    host: String,
}

impl FilesApiClient {
    /// Builds a client with the token installed as a default `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`DatabricksError`] if the token is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(config: &DatabricksConfig) -> Result<Self, DatabricksError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer_header(config.token())?);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(config.user_agent())
                .unwrap_or_else(|_| HeaderValue::from_static("intake")),
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            host: config.host().to_owned(),
        })
    }

    /// Returns the Files API URL for an absolute volume file path.
    ///
    /// Each segment is percent-encoded so filenames with spaces or `#` survive.
    pub fn file_url(&self, path: &str) -> String {
        let encoded: String = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| format!("/{}", urlencoding::encode(segment)))
            .collect();
        format!("{}{}{}", self.host, FILES_API_PREFIX, encoded)
    }

    fn error_from_response(path: &str, response: Response) -> StorageError {
        let status = response.status();
        let text = response.text().unwrap_or_default();
        let body: Option<ApiErrorBody> = serde_json::from_str(&text).ok();

        let code = body.as_ref().and_then(|b| b.error_code.clone());
        let message = body
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .or_else(|| Some(text.trim().to_owned()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned()
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                StorageError::PermissionDenied(message)
            }
            StatusCode::NOT_FOUND => StorageError::NotFound(message),
            StatusCode::CONFLICT => StorageError::AlreadyExists(format!("{}: {}", path, message)),
            _ => StorageError::Api {
                status: status.as_u16(),
                code,
                message,
            },
        }
    }
}

impl VolumeClient for FilesApiClient {
    fn upload(&self, path: &str, bytes: &[u8], overwrite: bool) -> Result<(), StorageError> {
        let url = self.file_url(path);
        tracing::debug!(%url, bytes = bytes.len(), overwrite, "uploading to Files API");

        let response = self
            .http
            .put(&url)
            .query(&[("overwrite", overwrite)])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::error_from_response(path, response))
    }

    fn backend_name(&self) -> &'static str {
        "databricks"
    }
}

/// `Bearer {token}`, marked sensitive so it stays out of debug output.
fn bearer_header(token: &str) -> Result<HeaderValue, DatabricksError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| DatabricksError::Config("token is not a valid header value".into()))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_uri: &str) -> FilesApiClient {
        let config = DatabricksConfig::new(server_uri, "dapi-test").unwrap();
        FilesApiClient::new(&config).unwrap()
    }

    /// Runs a blocking upload off the async test thread.
    async fn upload_blocking(
        server_uri: String,
        target: &'static str,
        bytes: &'static [u8],
    ) -> Result<(), StorageError> {
        tokio::task::spawn_blocking(move || client_for(&server_uri).upload(target, bytes, true))
            .await
            .unwrap()
    }

    #[test]
    fn test_file_url_encodes_segments() {
        let client = client_for("https://example.cloud.databricks.com");
        assert_eq!(
            client.file_url("/Volumes/main/intake/docs/Q3 report#1.pdf"),
            "https://example.cloud.databricks.com/api/2.0/fs/files/Volumes/main/intake/docs/Q3%20report%231.pdf"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upload_sends_put_with_overwrite() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/2.0/fs/files/Volumes/main/intake/docs/notes.txt"))
            .and(query_param("overwrite", "true"))
            .and(header("authorization", "Bearer dapi-test"))
            .and(header("content-type", "application/octet-stream"))
            .and(body_bytes(b"hello".to_vec()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = upload_blocking(server.uri(), "/Volumes/main/intake/docs/notes.txt", b"hello").await;

        assert!(result.is_ok(), "{result:?}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upload_forbidden_maps_to_permission_denied() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error_code": "PERMISSION_DENIED",
                "message": "User does not have WRITE VOLUME on Volume 'main.intake.docs'."
            })))
            .mount(&server)
            .await;

        let err = upload_blocking(server.uri(), "/Volumes/main/intake/docs/notes.txt", b"hello")
            .await
            .unwrap_err();

        match err {
            StorageError::PermissionDenied(message) => {
                assert_eq!(
                    message,
                    "User does not have WRITE VOLUME on Volume 'main.intake.docs'."
                );
            }
            other => panic!("expected PermissionDenied, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upload_missing_volume_maps_to_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error_code": "NOT_FOUND",
                "message": "Volume 'main.intake.nope' does not exist."
            })))
            .mount(&server)
            .await;

        let err = upload_blocking(server.uri(), "/Volumes/main/intake/nope/notes.txt", b"hello")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::NotFound(ref m) if m.contains("does not exist")));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upload_other_status_keeps_code_and_status() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error_code": "INVALID_PARAMETER_VALUE",
                "message": "Invalid path"
            })))
            .mount(&server)
            .await;

        let err = upload_blocking(server.uri(), "/Volumes/main/intake/docs/notes.txt", b"hello")
            .await
            .unwrap_err();

        match err {
            StorageError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("INVALID_PARAMETER_VALUE"));
                assert_eq!(message, "Invalid path");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upload_plain_text_error_body_is_passed_through() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway from proxy"))
            .mount(&server)
            .await;

        let err = upload_blocking(server.uri(), "/Volumes/main/intake/docs/notes.txt", b"hello")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StorageError::Api { status: 502, code: None, ref message } if message == "bad gateway from proxy"
        ));
    }

    #[test]
    fn test_upload_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = client_for("http://127.0.0.1:9");
        let err = client
            .upload("/Volumes/main/intake/docs/notes.txt", b"hello", true)
            .unwrap_err();

        assert!(matches!(err, StorageError::Transport(_)));
    }

    #[test]
    fn test_bearer_header_is_sensitive() {
        let value = bearer_header("dapi-secret").unwrap();

        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "Bearer dapi-secret");
        assert!(!format!("{:?}", value).contains("dapi-secret"));
        assert!(matches!(
            bearer_header("bad\ntoken"),
            Err(DatabricksError::Config(_))
        ));
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(client_for("https://example.com").backend_name(), "databricks");
    }
}
