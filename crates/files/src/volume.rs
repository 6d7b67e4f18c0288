//! The upload capability consumed by the workflow.

/// Failure modes of a volume upload.
///
/// Variants are kept distinct so callers can tell a permissions problem from a missing
/// volume or a transport failure. Each message is the backend's own, passed through verbatim.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The caller lacks permission to write the destination
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The catalog, schema or volume does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The destination exists and overwrite was not requested
    #[error("file already exists: {0}")]
    AlreadyExists(String),

    /// The destination path is not a valid volume file path
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The storage service rejected the request
    #[error("{message} (HTTP {status}{})", code_suffix(.code))]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The request never reached the storage service or its response was lost
    #[error("transport error: {0}")]
    Transport(String),

    /// Local I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(", {c}"))
        .unwrap_or_default()
}

/// A store that accepts whole-file uploads at `/Volumes/...` paths.
///
/// Implementations are constructed once at startup and injected into the workflow.
/// `upload` is blocking; async callers should run it on a blocking thread.
pub trait VolumeClient: Send + Sync {
    /// Writes `bytes` to the absolute volume file path `path`.
    ///
    /// With `overwrite` set, an existing file at `path` is replaced.
    fn upload(&self, path: &str, bytes: &[u8], overwrite: bool) -> Result<(), StorageError>;

    /// Short human-readable name of the backend, for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;
}
