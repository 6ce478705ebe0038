use std::path::PathBuf;

/// One file part buffered to temporary storage by the multipart ingestor.
///
/// The client-supplied filename is untrusted; the materializer sanitizes it
/// before any path is derived from it.
#[derive(Debug, Clone)]
pub struct TempUpload {
    pub original_filename: Option<String>,
    pub temp_path: PathBuf,
    pub size: u64,
}
