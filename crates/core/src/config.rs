//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services.
//! Request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_CONTENT_TABLE, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_METADATA_TABLE};
use intake_databricks::{DatabricksConfig, DatabricksError};
use intake_files::StorageError;
use std::path::PathBuf;
use std::time::Duration;

/// Default local directory standing in for `/Volumes` with the `local` backend.
pub const DEFAULT_LOCAL_VOLUMES_DIR: &str = "volumes";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is required for the {backend} storage backend")]
    Missing {
        key: &'static str,
        backend: &'static str,
    },
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error(transparent)]
    Databricks(#[from] DatabricksError),
    #[error("local storage backend: {0}")]
    Storage(#[from] StorageError),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    metadata_table: String,
    content_table: String,
    max_upload_bytes: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            metadata_table: DEFAULT_METADATA_TABLE.to_owned(),
            content_table: DEFAULT_CONTENT_TABLE.to_owned(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// Table names must be plain identifiers (`[A-Za-z0-9_]+`).
    pub fn new(
        metadata_table: String,
        content_table: String,
        max_upload_bytes: usize,
    ) -> Result<Self, ConfigError> {
        validate_table_name("INTAKE_METADATA_TABLE", &metadata_table)?;
        validate_table_name("INTAKE_CONTENT_TABLE", &content_table)?;

        if max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "INTAKE_MAX_UPLOAD_BYTES",
                message: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            metadata_table,
            content_table,
            max_upload_bytes,
        })
    }

    /// Reads `INTAKE_METADATA_TABLE`, `INTAKE_CONTENT_TABLE` and `INTAKE_MAX_UPLOAD_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let var = |key: &str| std::env::var(key).ok();

        Self::new(
            non_blank(var("INTAKE_METADATA_TABLE")).unwrap_or_else(|| DEFAULT_METADATA_TABLE.into()),
            non_blank(var("INTAKE_CONTENT_TABLE")).unwrap_or_else(|| DEFAULT_CONTENT_TABLE.into()),
            max_upload_bytes_from_env_value(var("INTAKE_MAX_UPLOAD_BYTES"))?,
        )
    }

    pub fn metadata_table(&self) -> &str {
        &self.metadata_table
    }

    pub fn content_table(&self) -> &str {
        &self.content_table
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

fn validate_table_name(key: &'static str, name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            message: format!("'{}' is not a plain table identifier", name),
        })
    }
}

/// Which [`VolumeClient`](intake_files::VolumeClient) to construct.
#[derive(Clone, Debug)]
pub enum StorageConfig {
    /// Databricks Files API
    Databricks(DatabricksConfig),
    /// Local directory tree standing in for `/Volumes`
    Local(PathBuf),
}

impl StorageConfig {
    /// Resolve storage settings from optional raw values.
    ///
    /// `backend` defaults to `databricks`; whitespace-only values count as unset.
    pub fn from_env_values(
        backend: Option<String>,
        host: Option<String>,
        token: Option<String>,
        timeout_secs: Option<String>,
        local_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        let backend = non_blank(backend).unwrap_or_else(|| "databricks".into());

        match backend.to_ascii_lowercase().as_str() {
            "databricks" => {
                let host = non_blank(host).ok_or(ConfigError::Missing {
                    key: "DATABRICKS_HOST",
                    backend: "databricks",
                })?;
                let token = non_blank(token).ok_or(ConfigError::Missing {
                    key: "DATABRICKS_TOKEN",
                    backend: "databricks",
                })?;

                let mut config = DatabricksConfig::new(host, token)?;
                if let Some(secs) = parse_number::<u64>("INTAKE_HTTP_TIMEOUT_SECS", timeout_secs)? {
                    config = config.with_timeout(Duration::from_secs(secs));
                }
                Ok(StorageConfig::Databricks(config))
            }
            "local" => {
                let dir = non_blank(local_dir).unwrap_or_else(|| DEFAULT_LOCAL_VOLUMES_DIR.into());
                Ok(StorageConfig::Local(PathBuf::from(dir)))
            }
            other => Err(ConfigError::InvalidValue {
                key: "INTAKE_STORAGE",
                message: format!("expected 'databricks' or 'local', got '{}'", other),
            }),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            StorageConfig::Databricks(_) => "databricks",
            StorageConfig::Local(_) => "local",
        }
    }
}

/// Everything a binary needs, read from the environment in one place.
#[derive(Clone, Debug)]
pub struct IntakeSettings {
    pub core: CoreConfig,
    pub storage: StorageConfig,
    /// Fallback submitter identity for surfaces without a request context (the CLI).
    pub uploaded_by: Option<String>,
}

impl IntakeSettings {
    /// Reads `INTAKE_*` and `DATABRICKS_*` variables. Call once at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let var = |key: &str| std::env::var(key).ok();

        let core = CoreConfig::from_env()?;
        let storage = StorageConfig::from_env_values(
            var("INTAKE_STORAGE"),
            var("DATABRICKS_HOST"),
            var("DATABRICKS_TOKEN"),
            var("INTAKE_HTTP_TIMEOUT_SECS"),
            var("INTAKE_LOCAL_VOLUMES_DIR"),
        )?;

        Ok(Self {
            core,
            storage,
            uploaded_by: non_blank(var("INTAKE_UPLOADED_BY")),
        })
    }
}

/// Parse the upload size limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_UPLOAD_BYTES`].
pub fn max_upload_bytes_from_env_value(value: Option<String>) -> Result<usize, ConfigError> {
    Ok(parse_number::<usize>("INTAKE_MAX_UPLOAD_BYTES", value)?.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    non_blank(value)
        .map(|v| {
            v.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key,
                message: format!("'{}': {}", v, e),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_config_defaults() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.metadata_table(), "document_metadata");
        assert_eq!(cfg.content_table(), "document_content");
        assert_eq!(cfg.max_upload_bytes(), 100 * 1024 * 1024);
    }

    #[test]
    fn test_core_config_rejects_bad_table_names() {
        let err = CoreConfig::new("docs; DROP".into(), "content".into(), 10).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "INTAKE_METADATA_TABLE",
                ..
            }
        ));
        assert!(CoreConfig::new("docs".into(), "".into(), 10).is_err());
        assert!(CoreConfig::new("docs".into(), "content".into(), 0).is_err());
    }

    #[test]
    fn test_max_upload_bytes_from_env_value() {
        assert_eq!(
            max_upload_bytes_from_env_value(None).unwrap(),
            DEFAULT_MAX_UPLOAD_BYTES
        );
        assert_eq!(
            max_upload_bytes_from_env_value(Some("  ".into())).unwrap(),
            DEFAULT_MAX_UPLOAD_BYTES
        );
        assert_eq!(
            max_upload_bytes_from_env_value(Some("2048".into())).unwrap(),
            2048
        );
        assert!(max_upload_bytes_from_env_value(Some("lots".into())).is_err());
    }

    #[test]
    fn test_storage_defaults_to_databricks_and_requires_credentials() {
        let err = StorageConfig::from_env_values(None, None, None, None, None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Missing {
                key: "DATABRICKS_HOST",
                ..
            }
        ));

        let err = StorageConfig::from_env_values(
            None,
            Some("https://example.com".into()),
            Some(" ".into()),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Missing {
                key: "DATABRICKS_TOKEN",
                ..
            }
        ));
    }

    #[test]
    fn test_storage_databricks_with_timeout() {
        let cfg = StorageConfig::from_env_values(
            Some("Databricks".into()),
            Some("https://example.com/".into()),
            Some("dapi123".into()),
            Some("30".into()),
            None,
        )
        .unwrap();

        match cfg {
            StorageConfig::Databricks(db) => {
                assert_eq!(db.host(), "https://example.com");
                assert_eq!(db.timeout(), Duration::from_secs(30));
            }
            other => panic!("expected Databricks, got {other:?}"),
        }
    }

    #[test]
    fn test_storage_local_default_dir() {
        let cfg = StorageConfig::from_env_values(Some("local".into()), None, None, None, None)
            .unwrap();
        assert_eq!(cfg.backend_name(), "local");
        assert!(matches!(
            cfg,
            StorageConfig::Local(ref dir) if dir == std::path::Path::new("volumes")
        ));
    }

    #[test]
    fn test_storage_rejects_unknown_backend() {
        let err =
            StorageConfig::from_env_values(Some("s3".into()), None, None, None, None).unwrap_err();
        assert!(err.to_string().contains("INTAKE_STORAGE"));
    }
}
