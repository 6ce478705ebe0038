//! Turn a buffered upload slot into a stored public file reference.

use crate::naming::destination_name;
use crate::traits::{StorageResult, UploadStore};
use chrono::Utc;
use samiti_core::models::TempUpload;

/// Materialize at most one upload for a logical field slot.
///
/// Resolution: an empty slot yields `None`; a multi-file slot resolves to its
/// first handle. A handle whose temporary file has gone missing is treated as
/// no-file rather than an error. Everything else relocates into the store and
/// returns the public reference path.
pub async fn materialize(
    store: &dyn UploadStore,
    field: &str,
    uploads: &[TempUpload],
) -> StorageResult<Option<String>> {
    let Some(upload) = uploads.first() else {
        return Ok(None);
    };

    // Guard against a handle without readable bytes behind it.
    if !tokio::fs::try_exists(&upload.temp_path).await.unwrap_or(false) {
        tracing::warn!(
            field = %field,
            temp = %upload.temp_path.display(),
            "Upload handle has no temporary file, treating as no-file"
        );
        return Ok(None);
    }

    store.ensure_dir().await?;

    let name = destination_name(
        Utc::now().timestamp_millis(),
        field,
        upload.original_filename.as_deref(),
    );

    let public = store.relocate(&upload.temp_path, &name).await?;
    Ok(Some(public))
}
