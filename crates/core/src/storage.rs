//! Storage backend construction.

use crate::config::{ConfigError, StorageConfig};
use intake_databricks::FilesApiClient;
use intake_files::{LocalVolumeClient, StorageError, VolumeClient};
use std::sync::Arc;

/// Builds the [`VolumeClient`] selected by `config`.
///
/// For the local backend the root directory is created if absent; volumes beneath it
/// are not.
///
/// # Errors
///
/// Returns [`ConfigError`] if the HTTP client cannot be built or the local root is unusable.
pub fn build_volume_client(config: &StorageConfig) -> Result<Arc<dyn VolumeClient>, ConfigError> {
    let client: Arc<dyn VolumeClient> = match config {
        StorageConfig::Databricks(databricks) => {
            tracing::info!(host = databricks.host(), "using Databricks Files API storage");
            Arc::new(FilesApiClient::new(databricks)?)
        }
        StorageConfig::Local(root) => {
            std::fs::create_dir_all(root).map_err(StorageError::from)?;
            let client = LocalVolumeClient::new(root)?;
            tracing::info!(
                root = %client.root_directory().display(),
                "using local directory storage"
            );
            Arc::new(client)
        }
    };

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_databricks::DatabricksConfig;

    #[test]
    fn test_build_local_client_creates_root() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("volumes");

        let client = build_volume_client(&StorageConfig::Local(root.clone())).unwrap();

        assert_eq!(client.backend_name(), "local");
        assert!(root.is_dir());
    }

    #[test]
    fn test_build_databricks_client() {
        let config = DatabricksConfig::new("https://example.cloud.databricks.com", "dapi123").unwrap();
        let client = build_volume_client(&StorageConfig::Databricks(config)).unwrap();

        assert_eq!(client.backend_name(), "databricks");
    }

    #[test]
    fn test_local_root_that_is_a_file_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let Err(err) = build_volume_client(&StorageConfig::Local(file)) else {
            panic!("expected an error");
        };
        assert!(matches!(err, ConfigError::Storage(_)));
    }
}
