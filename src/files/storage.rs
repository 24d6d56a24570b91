/**
 * Upload Storage
 *
 * Disk storage for uploaded files: content-type allow-list, size cap,
 * and collision-free sanitized filenames under the upload directory.
 *
 * # Constraints
 *
 * - Allowed types: jpeg, png, gif, webp, pdf
 * - Maximum size: 10 MB
 * - Stored name: `{sanitized-base}-{timestamp}-{nonce}{ext}`
 */

use rand::Rng;
use std::path::{Path, PathBuf};

/// Maximum accepted upload size (10 MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Allowed content types and their canonical extensions.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("application/pdf", ".pdf"),
];

/// The upload directory, from `UPLOAD_DIR` (default `uploads`).
pub fn upload_dir() -> PathBuf {
    std::env::var("UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("uploads"))
}

/// Create the upload directory if it does not exist.
pub async fn ensure_upload_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}

/// The canonical extension for an allowed content type, or None if the
/// type is not accepted.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
}

/// A human-readable list of the accepted content types.
pub fn allowed_types_list() -> String {
    ALLOWED_TYPES
        .iter()
        .map(|(mime, _)| *mime)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build a unique on-disk filename from the client-supplied name.
///
/// The base name is sanitized to `[A-Za-z0-9-_]`, and a timestamp plus
/// random nonce prevent collisions. The extension comes from the
/// content type, never from the client filename.
pub fn unique_filename(original_name: &str, extension: &str) -> String {
    let base = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let timestamp = chrono::Utc::now().timestamp_millis();
    let nonce: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

    format!("{sanitized}-{timestamp}-{nonce}{extension}")
}

/// Write the uploaded bytes under the upload directory.
pub async fn store(dir: &Path, filename: &str, data: &[u8]) -> std::io::Result<()> {
    ensure_upload_dir(dir).await?;
    tokio::fs::write(dir.join(filename), data).await
}
