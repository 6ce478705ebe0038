//! Multipart ingestion
//!
//! Parses an untrusted `multipart/form-data` body into text fields and file
//! handles buffered to temporary storage. Ingestion fully completes (or
//! fails) before any downstream step runs; there is no partial-field
//! processing. Any framing, size-limit, or buffering failure surfaces as a
//! single ingestion error carrying the underlying cause.

use axum::extract::Multipart;
use samiti_core::models::TempUpload;
use samiti_core::AppError;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Parsed multipart body: text fields and buffered file uploads, both keyed
/// by field name. A field name may repeat; multi-file inputs are supported.
#[derive(Debug, Default)]
pub struct IngestedForm {
    pub fields: HashMap<String, Vec<String>>,
    pub files: HashMap<String, Vec<TempUpload>>,
}

impl IngestedForm {
    /// First value of a text field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.first().map(String::as_str)
    }

    /// All uploads attached under a field; empty slice when absent.
    pub fn files(&self, name: &str) -> &[TempUpload] {
        self.files.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Consume the multipart stream, buffering each file part to a uniquely-named
/// temporary file under `tmp_dir` and enforcing `max_file_size` per file.
/// A file exceeding the ceiling fails the whole request rather than being
/// truncated.
pub async fn ingest_form(
    mut multipart: Multipart,
    tmp_dir: &Path,
    max_file_size: u64,
) -> Result<IngestedForm, AppError> {
    fs::create_dir_all(tmp_dir)
        .await
        .map_err(|e| AppError::Ingestion(format!("Failed to create temp directory: {}", e)))?;

    let mut form = IngestedForm::default();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Ingestion(format!("Failed to read multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            // Unnamed parts carry nothing we can address; skip them.
            continue;
        };

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let original_filename = (!file_name.is_empty()).then_some(file_name);
            let temp_path = tmp_dir.join(format!("upload_{}", Uuid::new_v4()));

            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                AppError::Ingestion(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            let mut size: u64 = 0;
            loop {
                let chunk = match field.chunk().await {
                    Ok(Some(chunk)) => chunk,
                    Ok(None) => break,
                    Err(e) => {
                        remove_partial(&temp_path).await;
                        return Err(AppError::Ingestion(format!(
                            "Failed to read file field '{}': {}",
                            name, e
                        )));
                    }
                };

                size += chunk.len() as u64;
                if size > max_file_size {
                    remove_partial(&temp_path).await;
                    return Err(AppError::Ingestion(format!(
                        "File field '{}' exceeds the maximum size of {} bytes",
                        name, max_file_size
                    )));
                }

                if let Err(e) = file.write_all(&chunk).await {
                    remove_partial(&temp_path).await;
                    return Err(AppError::Ingestion(format!(
                        "Failed to buffer file field '{}' to {}: {}",
                        name,
                        temp_path.display(),
                        e
                    )));
                }
            }

            file.sync_all().await.map_err(|e| {
                AppError::Ingestion(format!(
                    "Failed to sync temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            tracing::debug!(
                field = %name,
                temp = %temp_path.display(),
                size_bytes = size,
                "Buffered upload to temporary storage"
            );

            form.files.entry(name).or_default().push(TempUpload {
                original_filename,
                temp_path,
                size,
            });
        } else {
            let text = field.text().await.map_err(|e| {
                AppError::Ingestion(format!("Failed to read field '{}': {}", name, e))
            })?;
            form.fields.entry(name).or_default().push(text);
        }
    }

    Ok(form)
}

/// Best-effort removal of a partially-buffered temp file after a failure.
async fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        tracing::debug!(temp = %path.display(), error = %e, "Failed to remove partial temp file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header::CONTENT_TYPE, Request};

    const BOUNDARY: &str = "test-boundary";

    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                        name, f
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    async fn multipart_from(parts: &[(&str, Option<&str>, &[u8])]) -> Multipart {
        let request = Request::builder()
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn fields_and_files_are_separated() {
        let dir = tempfile::tempdir().unwrap();
        let multipart = multipart_from(&[
            ("email", None, b"owner@example.com"),
            ("ownerPhoto", Some("me.png"), b"png bytes"),
        ])
        .await;

        let form = ingest_form(multipart, dir.path(), 1024).await.unwrap();

        assert_eq!(form.field("email"), Some("owner@example.com"));
        let files = form.files("ownerPhoto");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].original_filename.as_deref(), Some("me.png"));
        assert_eq!(files[0].size, 9);
        assert_eq!(
            tokio::fs::read(&files[0].temp_path).await.unwrap(),
            b"png bytes"
        );
    }

    #[tokio::test]
    async fn repeated_file_fields_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let multipart = multipart_from(&[
            ("ownershipProofFile", Some("a.pdf"), b"first"),
            ("ownershipProofFile", Some("b.pdf"), b"second"),
        ])
        .await;

        let form = ingest_form(multipart, dir.path(), 1024).await.unwrap();
        assert_eq!(form.files("ownershipProofFile").len(), 2);
    }

    #[tokio::test]
    async fn oversized_file_fails_the_whole_request() {
        let dir = tempfile::tempdir().unwrap();
        let big = vec![0u8; 64];
        let multipart = multipart_from(&[("paymentReceipt", Some("big.bin"), &big)]).await;

        let err = ingest_form(multipart, dir.path(), 16).await.unwrap_err();
        assert!(matches!(err, AppError::Ingestion(_)));
        assert!(err.to_string().contains("paymentReceipt"));

        // The partial buffer is cleaned up.
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn absent_slots_resolve_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let multipart = multipart_from(&[("email", None, b"a@b.c")]).await;

        let form = ingest_form(multipart, dir.path(), 1024).await.unwrap();
        assert!(form.files("ownerPhoto").is_empty());
        assert_eq!(form.field("missing"), None);
    }
}
