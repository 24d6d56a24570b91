//! Database operations for tasks
//!
//! Reads join both referenced users (assignee and creator) so responses
//! carry display attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::auth::users::UserSummary;

/// Task completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A task with both user references resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assigned_to: UserSummary,
    pub created_by: UserSummary,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn task_from_row(row: &sqlx::postgres::PgRow) -> Task {
    Task {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        status: TaskStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(TaskStatus::Pending),
        assigned_to: UserSummary {
            id: row.get("assigned_to"),
            name: row.get("assignee_name"),
            email: row.get("assignee_email"),
        },
        created_by: UserSummary {
            id: row.get("created_by"),
            name: row.get("creator_name"),
            email: row.get("creator_email"),
        },
        due_date: row.get("due_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const TASK_COLUMNS: &str = r#"
    t.id, t.title, t.description, t.status, t.assigned_to, t.created_by,
    t.due_date, t.created_at, t.updated_at,
    a.name AS assignee_name, a.email AS assignee_email,
    c.name AS creator_name, c.email AS creator_email
"#;

/// Create a new task and return it with both users resolved.
pub async fn create_task(
    pool: &PgPool,
    title: &str,
    description: Option<&str>,
    status: TaskStatus,
    assigned_to: Uuid,
    created_by: Uuid,
    due_date: Option<DateTime<Utc>>,
) -> Result<Task, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO tasks (id, title, description, status, assigned_to, created_by, due_date, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(status.as_str())
    .bind(assigned_to)
    .bind(created_by)
    .bind(due_date)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_task_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get a task by ID with both users resolved, or None if absent.
pub async fn get_task_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        SELECT {TASK_COLUMNS}
        FROM tasks t
        JOIN users a ON a.id = t.assigned_to
        JOIN users c ON c.id = t.created_by
        WHERE t.id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(task_from_row))
}

/// Get all tasks assigned to a user, newest first.
pub async fn get_tasks_by_assignee(pool: &PgPool, user_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {TASK_COLUMNS}
        FROM tasks t
        JOIN users a ON a.id = t.assigned_to
        JOIN users c ON c.id = t.created_by
        WHERE t.assigned_to = $1
        ORDER BY t.created_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(task_from_row).collect())
}

/// Update a task's provided fields, returning the updated task.
#[allow(clippy::too_many_arguments)]
pub async fn update_task(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    status: Option<TaskStatus>,
    assigned_to: Option<Uuid>,
    due_date: Option<DateTime<Utc>>,
) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE tasks
        SET title = COALESCE($1, title),
            description = COALESCE($2, description),
            status = COALESCE($3, status),
            assigned_to = COALESCE($4, assigned_to),
            due_date = COALESCE($5, due_date),
            updated_at = $6
        WHERE id = $7
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(status.map(|s| s.as_str()))
    .bind(assigned_to)
    .bind(due_date)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    get_task_by_id(pool, id).await
}

/// Delete a task by ID.
pub async fn delete_task(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
