/**
 * Task Handlers
 *
 * Assignment-scoped CRUD over tasks. Reads are allowed for the assignee
 * or the creator; updates and deletes for the creator only. As with
 * notes, the existence check precedes the permission check.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::tasks::db::{
    create_task, delete_task, get_task_by_id, get_tasks_by_assignee, update_task, Task, TaskStatus,
};

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
}

/// Partial update request; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
}

/// List response with a count, newest first.
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub count: usize,
    pub tasks: Vec<Task>,
}

/// Create a new task (POST /api/tasks)
pub async fn create(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let title = request.title.trim();
    let Some(assigned_to) = request.assigned_to else {
        return Err(ApiError::Validation(
            "Please provide title and assigned_to".to_string(),
        ));
    };
    if title.is_empty() {
        return Err(ApiError::Validation(
            "Please provide title and assigned_to".to_string(),
        ));
    }

    let task = create_task(
        &pool,
        title,
        request.description.as_deref(),
        request.status.unwrap_or(TaskStatus::Pending),
        assigned_to,
        user.user_id,
        request.due_date,
    )
    .await?;
    tracing::info!("Task created: {} by {}", task.id, user.user_id);

    Ok((StatusCode::CREATED, Json(task)))
}

/// List tasks assigned to the caller (GET /api/tasks)
pub async fn list(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<TaskListResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let tasks = get_tasks_by_assignee(&pool, user.user_id).await?;

    Ok(Json(TaskListResponse {
        count: tasks.len(),
        tasks,
    }))
}

/// Fetch a task; 404 if absent.
async fn existing_task(pool: &PgPool, id: Uuid) -> Result<Task, ApiError> {
    get_task_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))
}

/// Get a single task (GET /api/tasks/{id}); assignee or creator only.
pub async fn get(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let task = existing_task(&pool, id).await?;

    let is_assigned = task.assigned_to.id == user.user_id;
    let is_creator = task.created_by.id == user.user_id;
    if !is_assigned && !is_creator {
        return Err(ApiError::Forbidden(
            "Access denied. You do not have permission to access this task.".to_string(),
        ));
    }

    Ok(Json(task))
}

/// Update a task (PUT /api/tasks/{id}); creator only.
pub async fn update(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let task = existing_task(&pool, id).await?;

    if task.created_by.id != user.user_id {
        return Err(ApiError::Forbidden(
            "Access denied. Only the creator can update this task.".to_string(),
        ));
    }

    let title = request.title.as_deref().map(str::trim);
    if matches!(title, Some("")) {
        return Err(ApiError::Validation("Title must not be empty".to_string()));
    }

    let task = update_task(
        &pool,
        id,
        title,
        request.description.as_deref(),
        request.status,
        request.assigned_to,
        request.due_date,
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::info!("Task updated: {} by {}", id, user.user_id);
    Ok(Json(task))
}

/// Delete a task (DELETE /api/tasks/{id}); creator only.
pub async fn delete(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let task = existing_task(&pool, id).await?;

    if task.created_by.id != user.user_id {
        return Err(ApiError::Forbidden(
            "Access denied. Only the creator can delete this task.".to_string(),
        ));
    }

    delete_task(&pool, id).await?;
    tracing::info!("Task deleted: {} by {}", id, user.user_id);

    Ok(Json(
        serde_json::json!({ "message": "Task deleted successfully" }),
    ))
}
