// File Handlers
//
// Multipart upload with metadata persistence, and a list endpoint for
// the caller's uploads. Stored files are served statically at
// `/uploads/*` by the router.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::files::db::{create_file, get_files_by_uploader, StoredFile};
use crate::files::storage::{
    allowed_types_list, extension_for, store, unique_filename, upload_dir, MAX_FILE_SIZE,
};
use crate::middleware::auth::AuthUser;

/// Upload response: persisted metadata plus the client's original name.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub file: StoredFile,
    pub original_name: String,
}

/// List response with a count, newest first.
#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub count: usize,
    pub files: Vec<StoredFile>,
}

/// Upload a file (POST /api/files, multipart field `file`)
///
/// # Errors
///
/// * `400 Bad Request` - No `file` field, disallowed content type, or
///   payload over 10 MB
/// * `503 Service Unavailable` - Database is not configured
/// * `500 Internal Server Error` - Disk write or metadata insert failed
pub async fn upload(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let mut upload_part = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Malformed multipart body: {:?}", e);
        ApiError::Validation("Malformed multipart body".to_string())
    })? {
        if field.name() == Some("file") {
            let original_name = field.file_name().unwrap_or("file").to_string();
            let content_type = field.content_type().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(|e| {
                tracing::warn!("Failed to read upload body: {:?}", e);
                ApiError::Validation("File size too large. Maximum size is 10MB".to_string())
            })?;
            upload_part = Some((original_name, content_type, data));
            break;
        }
    }

    let Some((original_name, content_type, data)) = upload_part else {
        return Err(ApiError::Validation("No file uploaded".to_string()));
    };

    let Some(extension) = extension_for(&content_type) else {
        return Err(ApiError::Validation(format!(
            "Invalid file type. Allowed types: {}",
            allowed_types_list()
        )));
    };

    if data.len() > MAX_FILE_SIZE {
        return Err(ApiError::Validation(
            "File size too large. Maximum size is 10MB".to_string(),
        ));
    }

    let filename = unique_filename(&original_name, extension);
    let dir = upload_dir();
    store(&dir, &filename, &data).await.map_err(|e| {
        tracing::error!("Failed to write upload to disk: {:?}", e);
        ApiError::Storage(e)
    })?;

    let url = format!("/uploads/{filename}");
    let file = create_file(&pool, &filename, &content_type, &url, user.user_id).await?;
    tracing::info!("File uploaded: {} by {}", file.id, user.user_id);

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            file,
            original_name,
        }),
    ))
}

/// List the caller's uploads (GET /api/files)
pub async fn list(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<FileListResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let files = get_files_by_uploader(&pool, user.user_id).await?;

    Ok(Json(FileListResponse {
        count: files.len(),
        files,
    }))
}
