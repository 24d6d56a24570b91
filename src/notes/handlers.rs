/**
 * Note Handlers
 *
 * Owner-scoped CRUD over notes. Every route sits behind the auth
 * middleware; single-record operations check ownership after the
 * existence check, so a caller learns "not found" before "not yours".
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::notes::db::{
    create_note, delete_note, get_note_by_id, get_notes_by_owner, update_note, Note,
};

/// Create note request
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update request; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// List response with a count, newest first.
#[derive(Debug, Serialize)]
pub struct NoteListResponse {
    pub count: usize,
    pub notes: Vec<Note>,
}

/// Create a new note (POST /api/notes)
pub async fn create(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let title = request.title.trim();
    if title.is_empty() || request.content.is_empty() {
        return Err(ApiError::Validation(
            "Please provide title and content".to_string(),
        ));
    }

    let note = create_note(&pool, title, &request.content, &request.tags, user.user_id).await?;
    tracing::info!("Note created: {} by {}", note.id, user.user_id);

    Ok((StatusCode::CREATED, Json(note)))
}

/// List the caller's notes (GET /api/notes)
pub async fn list(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<NoteListResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let notes = get_notes_by_owner(&pool, user.user_id).await?;

    Ok(Json(NoteListResponse {
        count: notes.len(),
        notes,
    }))
}

/// Fetch a note and enforce ownership: 404 before 403.
async fn owned_note(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Note, ApiError> {
    let note = get_note_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    if note.owner.id != user_id {
        return Err(ApiError::Forbidden(
            "Access denied. You do not have permission to access this note.".to_string(),
        ));
    }

    Ok(note)
}

/// Get a single note (GET /api/notes/{id})
pub async fn get(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let note = owned_note(&pool, id, user.user_id).await?;
    Ok(Json(note))
}

/// Update a note (PUT /api/notes/{id})
pub async fn update(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    owned_note(&pool, id, user.user_id).await?;

    let title = request.title.as_deref().map(str::trim);
    if matches!(title, Some("")) {
        return Err(ApiError::Validation("Title must not be empty".to_string()));
    }

    let note = update_note(
        &pool,
        id,
        title,
        request.content.as_deref(),
        request.tags.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    tracing::info!("Note updated: {} by {}", id, user.user_id);
    Ok(Json(note))
}

/// Delete a note (DELETE /api/notes/{id})
pub async fn delete(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    owned_note(&pool, id, user.user_id).await?;

    delete_note(&pool, id).await?;
    tracing::info!("Note deleted: {} by {}", id, user.user_id);

    Ok(Json(
        serde_json::json!({ "message": "Note deleted successfully" }),
    ))
}
