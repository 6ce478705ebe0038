//! Destination-name derivation for stored uploads.

use std::path::Path;

/// Maximum length of the sanitized basename, in characters.
const MAX_BASENAME_CHARS: usize = 40;

/// Derive the stored file name for one upload slot:
/// `{unix_millis}-{field}-{sanitized_basename}{ext}`.
///
/// The basename has whitespace runs collapsed to single underscores and is
/// truncated to 40 characters; the original extension is kept. An absent
/// client filename falls back to the literal `file`. Uniqueness is only
/// probabilistic: two uploads for the same field in the same millisecond
/// would collide and overwrite.
pub fn destination_name(unix_millis: i64, field: &str, original_filename: Option<&str>) -> String {
    let original = match original_filename {
        Some(name) if !name.trim().is_empty() => name,
        _ => "file",
    };

    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let base: String = sanitize(stem).chars().take(MAX_BASENAME_CHARS).collect();

    format!("{}-{}-{}{}", unix_millis, field, base, ext)
}

/// Collapse whitespace runs to single underscores; strip path separators and
/// parent references so an untrusted filename can never escape the store.
fn sanitize(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut in_whitespace = false;
    for c in stem.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
                in_whitespace = true;
            }
        } else if c == '/' || c == '\\' {
            out.push('_');
            in_whitespace = false;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    let out = out.replace("..", "_");
    if out.is_empty() {
        "file".to_string()
    } else {
        out
    }
}
