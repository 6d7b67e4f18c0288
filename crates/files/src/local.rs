//! Filesystem-backed volume client.
//!
//! Stands in for Unity Catalog when running locally. A root directory plays the role of
//! `/Volumes`, and each `<catalog>/<schema>/<volume>` directory beneath it is a volume:
//!
//! ```text
//! <root>/
//! └── main/
//!     └── intake/
//!         └── docs/                      # the volume; must already exist
//!             └── 20260118_143522_550e8400_notes.txt
//! ```
//!
//! Like the real service, uploading into a volume that does not exist fails with
//! [`StorageError::NotFound`] instead of creating it.

use crate::{StorageError, VolumeClient, VOLUMES_ROOT};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of path segments after `/Volumes` that name the volume itself.
const VOLUME_DEPTH: usize = 3;

/// [`VolumeClient`] that writes into a local directory tree.
#[derive(Debug, Clone)]
pub struct LocalVolumeClient {
    root_directory: PathBuf,
}

impl LocalVolumeClient {
    /// Creates a client rooted at `root_directory`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidPath`] if the root does not exist or is not a
    /// directory, or [`StorageError::Io`] if it cannot be canonicalised.
    pub fn new(root_directory: &Path) -> Result<Self, StorageError> {
        if !root_directory.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "local volumes root is not a directory: {}",
                root_directory.display()
            )));
        }

        let root_directory = root_directory.canonicalize()?;
        Ok(Self { root_directory })
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    /// Maps `/Volumes/c/s/v/rest...` to `(<root>/c/s/v, <root>/c/s/v/rest...)`.
    fn resolve(&self, path: &str) -> Result<(PathBuf, PathBuf), StorageError> {
        let relative = path
            .strip_prefix(VOLUMES_ROOT)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                StorageError::InvalidPath(format!("path must start with {VOLUMES_ROOT}/: {path}"))
            })?;

        let segments: Vec<&str> = relative.split('/').collect();
        if segments.len() <= VOLUME_DEPTH {
            return Err(StorageError::InvalidPath(format!(
                "path must name a file inside a volume: {path}"
            )));
        }

        if segments
            .iter()
            .any(|s| s.is_empty() || *s == "." || *s == "..")
        {
            return Err(StorageError::InvalidPath(format!(
                "path contains empty or relative segments: {path}"
            )));
        }

        let volume_dir = segments[..VOLUME_DEPTH]
            .iter()
            .fold(self.root_directory.clone(), |acc, s| acc.join(s));
        let file_path = segments[VOLUME_DEPTH..]
            .iter()
            .fold(volume_dir.clone(), |acc, s| acc.join(s));

        Ok((volume_dir, file_path))
    }
}

impl VolumeClient for LocalVolumeClient {
    fn upload(&self, path: &str, bytes: &[u8], overwrite: bool) -> Result<(), StorageError> {
        let (volume_dir, file_path) = self.resolve(path)?;

        if !volume_dir.is_dir() {
            return Err(StorageError::NotFound(format!(
                "volume does not exist: {}",
                volume_dir.display()
            )));
        }

        if !overwrite && file_path.exists() {
            return Err(StorageError::AlreadyExists(path.to_owned()));
        }

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create directory {}: {}", parent.display(), e),
                ))
            })?;
        }

        fs::write(&file_path, bytes).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                StorageError::PermissionDenied(format!("{}: {}", file_path.display(), e))
            } else {
                StorageError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to write file to {}: {}", file_path.display(), e),
                ))
            }
        })?;

        tracing::debug!(path, bytes = bytes.len(), "wrote file to local volume");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Creates `<root>/main/intake/docs` and returns a client rooted at `<root>`.
    fn create_test_volume(temp: &TempDir) -> LocalVolumeClient {
        fs::create_dir_all(temp.path().join("main/intake/docs")).unwrap();
        LocalVolumeClient::new(temp.path()).unwrap()
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = LocalVolumeClient::new(&temp.path().join("missing"));

        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[test]
    fn test_new_rejects_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "not a directory").unwrap();

        assert!(matches!(
            LocalVolumeClient::new(&file),
            Err(StorageError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_upload_writes_file() {
        let temp = TempDir::new().unwrap();
        let client = create_test_volume(&temp);

        client
            .upload("/Volumes/main/intake/docs/notes.txt", b"hello", true)
            .unwrap();

        let stored = fs::read(temp.path().join("main/intake/docs/notes.txt")).unwrap();
        assert_eq!(stored, b"hello");
    }

    #[test]
    fn test_upload_creates_nested_directories_inside_volume() {
        let temp = TempDir::new().unwrap();
        let client = create_test_volume(&temp);

        client
            .upload("/Volumes/main/intake/docs/2026/01/notes.txt", b"x", true)
            .unwrap();

        assert!(temp.path().join("main/intake/docs/2026/01/notes.txt").is_file());
    }

    #[test]
    fn test_upload_missing_volume_is_not_found() {
        let temp = TempDir::new().unwrap();
        let client = create_test_volume(&temp);

        let result = client.upload("/Volumes/main/intake/missing/notes.txt", b"x", true);

        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert!(!temp.path().join("main/intake/missing").exists());
    }

    #[test]
    fn test_upload_overwrite_semantics() {
        let temp = TempDir::new().unwrap();
        let client = create_test_volume(&temp);
        let path = "/Volumes/main/intake/docs/notes.txt";

        client.upload(path, b"first", false).unwrap();

        let refused = client.upload(path, b"second", false);
        assert!(matches!(refused, Err(StorageError::AlreadyExists(_))));

        client.upload(path, b"third", true).unwrap();
        let stored = fs::read(temp.path().join("main/intake/docs/notes.txt")).unwrap();
        assert_eq!(stored, b"third");
    }

    #[test]
    fn test_upload_rejects_paths_outside_volumes() {
        let temp = TempDir::new().unwrap();
        let client = create_test_volume(&temp);

        for bad in [
            "/tmp/notes.txt",
            "Volumes/main/intake/docs/notes.txt",
            "/Volumes/main/intake/docs",
            "/Volumes/main/intake/docs/../../../escape.txt",
            "/Volumes/main//docs/notes.txt",
        ] {
            let result = client.upload(bad, b"x", true);
            assert!(
                matches!(result, Err(StorageError::InvalidPath(_))),
                "expected InvalidPath for {bad}"
            );
        }
    }

    #[test]
    fn test_backend_name() {
        let temp = TempDir::new().unwrap();
        assert_eq!(create_test_volume(&temp).backend_name(), "local");
    }
}
