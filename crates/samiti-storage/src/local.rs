use crate::traits::{StorageError, StorageResult, UploadStore};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem upload store
#[derive(Clone)]
pub struct LocalUploadStore {
    base_path: PathBuf,
    public_prefix: String,
}

impl LocalUploadStore {
    /// Create a new LocalUploadStore instance
    ///
    /// # Arguments
    /// * `base_path` - Directory files are relocated into (e.g., "public/uploads")
    /// * `public_prefix` - Prefix stored references are built from (e.g., "/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, public_prefix: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalUploadStore {
            base_path,
            public_prefix,
        })
    }

    /// Validate a destination name: a single path component, no traversal.
    fn checked_dest(&self, dest_name: &str) -> StorageResult<PathBuf> {
        if dest_name.is_empty()
            || dest_name.contains("..")
            || dest_name.contains('/')
            || dest_name.contains('\\')
        {
            return Err(StorageError::InvalidName(dest_name.to_string()));
        }
        Ok(self.base_path.join(dest_name))
    }

    /// Public path for a stored file name.
    fn public_path(&self, dest_name: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), dest_name)
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    async fn relocate(&self, temp: &Path, dest_name: &str) -> StorageResult<String> {
        let dest = self.checked_dest(dest_name)?;
        let start = std::time::Instant::now();

        match fs::rename(temp, &dest).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                // Temp storage on a different device: copy then delete the
                // source. Not atomic; a crash mid-copy leaves a partial
                // destination file behind.
                tracing::warn!(
                    temp = %temp.display(),
                    dest = %dest.display(),
                    "Cross-device rename, falling back to copy+delete"
                );
                fs::copy(temp, &dest).await.map_err(|e| {
                    StorageError::RelocateFailed(format!(
                        "Failed to copy {} to {}: {}",
                        temp.display(),
                        dest.display(),
                        e
                    ))
                })?;
                fs::remove_file(temp).await.map_err(|e| {
                    StorageError::RelocateFailed(format!(
                        "Failed to remove temp file {}: {}",
                        temp.display(),
                        e
                    ))
                })?;
            }
            Err(e) => {
                return Err(StorageError::RelocateFailed(format!(
                    "Failed to rename {} to {}: {}",
                    temp.display(),
                    dest.display(),
                    e
                )));
            }
        }

        let public = self.public_path(dest_name);

        tracing::info!(
            dest = %dest.display(),
            public = %public,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload relocated"
        );

        Ok(public)
    }
}
