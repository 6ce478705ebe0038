//! Upload storage setup

use anyhow::Result;
use samiti_core::Config;
use samiti_storage::{LocalUploadStore, UploadStore};
use std::sync::Arc;

/// Setup the upload store the registration pipeline relocates files into.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn UploadStore>> {
    let store = LocalUploadStore::new(
        config.upload_dir(),
        config.upload_public_prefix().to_string(),
    )
    .await?;

    tracing::info!(
        upload_dir = %config.upload_dir().display(),
        public_prefix = %config.upload_public_prefix(),
        "Upload store initialized"
    );

    Ok(Arc::new(store))
}
