//! Database operations for chat messages
//!
//! Messages are written once on a `sendMessage` event and never updated
//! or deleted by the chat subsystem.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// A persisted chat message.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Uuid,
    pub receiver: Option<Uuid>,
    pub content: String,
    pub room: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a new message
///
/// Returns the durable row; delivery fan-out must not start until this
/// has completed.
pub async fn create_message(
    pool: &PgPool,
    sender: Uuid,
    receiver: Option<Uuid>,
    content: &str,
    room: Option<&str>,
) -> Result<Message, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO messages (id, sender, receiver, content, room, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(sender)
    .bind(receiver)
    .bind(content)
    .bind(room)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Message {
        id,
        sender,
        receiver,
        content: content.to_string(),
        room: room.map(|s| s.to_string()),
        created_at: now,
        updated_at: now,
    })
}
