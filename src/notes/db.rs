//! Database operations for notes
//!
//! Single-record reads join the owning user so responses carry display
//! attributes instead of a bare owner id.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::auth::users::UserSummary;

/// A note with its owner resolved to display attributes.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub owner: UserSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn note_from_row(row: &sqlx::postgres::PgRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        tags: row.get("tags"),
        owner: UserSummary {
            id: row.get("owner"),
            name: row.get("owner_name"),
            email: row.get("owner_email"),
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const NOTE_COLUMNS: &str = r#"
    n.id, n.title, n.content, n.tags, n.owner, n.created_at, n.updated_at,
    u.name AS owner_name, u.email AS owner_email
"#;

/// Create a new note and return it with the owner resolved.
pub async fn create_note(
    pool: &PgPool,
    title: &str,
    content: &str,
    tags: &[String],
    owner: Uuid,
) -> Result<Note, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO notes (id, title, content, tags, owner, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(tags)
    .bind(owner)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_note_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get a note by ID with its owner resolved, or None if absent.
pub async fn get_note_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Note>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        SELECT {NOTE_COLUMNS}
        FROM notes n
        JOIN users u ON u.id = n.owner
        WHERE n.id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(note_from_row))
}

/// Get all notes owned by a user, newest first.
pub async fn get_notes_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Note>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {NOTE_COLUMNS}
        FROM notes n
        JOIN users u ON u.id = n.owner
        WHERE n.owner = $1
        ORDER BY n.created_at DESC
        "#
    ))
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(note_from_row).collect())
}

/// Update a note's provided fields, returning the updated note.
pub async fn update_note(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
    tags: Option<&[String]>,
) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE notes
        SET title = COALESCE($1, title),
            content = COALESCE($2, content),
            tags = COALESCE($3, tags),
            updated_at = $4
        WHERE id = $5
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(tags)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    get_note_by_id(pool, id).await
}

/// Delete a note by ID.
pub async fn delete_note(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM notes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
