//! Database operations for file metadata

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::auth::users::UserSummary;

/// Metadata for a stored upload, with the uploader resolved.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub url: String,
    pub uploaded_by: UserSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn file_from_row(row: &sqlx::postgres::PgRow) -> StoredFile {
    StoredFile {
        id: row.get("id"),
        filename: row.get("filename"),
        file_type: row.get("file_type"),
        url: row.get("url"),
        uploaded_by: UserSummary {
            id: row.get("uploaded_by"),
            name: row.get("uploader_name"),
            email: row.get("uploader_email"),
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const FILE_COLUMNS: &str = r#"
    f.id, f.filename, f.file_type, f.url, f.uploaded_by, f.created_at, f.updated_at,
    u.name AS uploader_name, u.email AS uploader_email
"#;

/// Persist metadata for a stored upload and return it resolved.
pub async fn create_file(
    pool: &PgPool,
    filename: &str,
    file_type: &str,
    url: &str,
    uploaded_by: Uuid,
) -> Result<StoredFile, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO files (id, filename, file_type, url, uploaded_by, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(filename)
    .bind(file_type)
    .bind(url)
    .bind(uploaded_by)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_file_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get file metadata by ID, or None if absent.
pub async fn get_file_by_id(pool: &PgPool, id: Uuid) -> Result<Option<StoredFile>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        SELECT {FILE_COLUMNS}
        FROM files f
        JOIN users u ON u.id = f.uploaded_by
        WHERE f.id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(file_from_row))
}

/// Get all files uploaded by a user, newest first.
pub async fn get_files_by_uploader(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<StoredFile>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {FILE_COLUMNS}
        FROM files f
        JOIN users u ON u.id = f.uploaded_by
        WHERE f.uploaded_by = $1
        ORDER BY f.created_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(file_from_row).collect())
}
