//! Upload-store abstraction trait
//!
//! This module defines the capability interface the registration pipeline
//! relocates uploaded files through. Keeping it a trait lets tests substitute
//! a temp-scoped store instead of touching a shared filesystem location.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid destination name: {0}")]
    InvalidName(String),

    #[error("Relocation failed: {0}")]
    RelocateFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable home for uploaded files.
///
/// `relocate` prefers a single atomic rename from temporary storage; when the
/// source and destination live on different devices it falls back to
/// copy-then-delete. That fallback has a non-atomic window: a crash mid-copy
/// can leave a partial destination file behind. Implementations log the
/// fallback so operators can spot it.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Create the destination directory if missing. Idempotent and safe under
    /// concurrent creators.
    async fn ensure_dir(&self) -> StorageResult<()>;

    /// Move a temporary file into the store under `dest_name` and return its
    /// public-facing path.
    async fn relocate(&self, temp: &Path, dest_name: &str) -> StorageResult<String>;
}
