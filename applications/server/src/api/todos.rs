/// Task API routes
///
/// Every handler runs behind the auth middleware and scopes its queries to
/// the authenticated owner. A task belonging to another user is reported as
/// 404, indistinguishable from one that does not exist.
use crate::{
    error::{Result, ServerError},
    middleware::CurrentUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tally_core::types::{normalize_due_date, CreateTask, Task, TaskId, UpdateTask};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    // Option so an absent title reports as a validation failure instead of a
    // deserialization rejection
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

/// GET /api/todos
///
/// All tasks owned by the caller, due date ascending with undated tasks last.
pub async fn list_todos(
    State(app_state): State<AppState>,
    auth: CurrentUser,
) -> Result<Json<Vec<Task>>> {
    let tasks = tally_storage::tasks::list_for_owner(&app_state.pool, &auth.id).await?;
    Ok(Json(tasks))
}

/// POST /api/todos
///
/// Create a new task owned by the caller; completed always starts false.
pub async fn create_todo(
    State(app_state): State<AppState>,
    auth: CurrentUser,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Task>)> {
    let due_date = match req.due_date.as_deref() {
        Some(raw) => Some(normalize_due_date(raw)?),
        None => None,
    };

    let create = CreateTask {
        title: req.title.unwrap_or_default(),
        description: req.description,
        due_date,
        owner_id: auth.id,
    };
    create.validate()?;

    let task = tally_storage::tasks::create(&app_state.pool, &create).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/todos/:id
pub async fn get_todo(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: CurrentUser,
) -> Result<Json<Task>> {
    let task_id = TaskId::new(id);
    let task = tally_storage::tasks::get_by_id(&app_state.pool, &task_id, &auth.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// PUT /api/todos/:id
///
/// Partial update; absent fields keep their current value.
pub async fn update_todo(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: CurrentUser,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Task>> {
    let due_date = match req.due_date.as_deref() {
        Some(raw) => Some(normalize_due_date(raw)?),
        None => None,
    };

    let update = UpdateTask {
        title: req.title,
        description: req.description,
        due_date,
        completed: req.completed,
    };
    update.validate()?;

    let task_id = TaskId::new(id);
    let task = tally_storage::tasks::update(&app_state.pool, &task_id, &auth.id, &update)
        .await?
        .ok_or_else(|| ServerError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// DELETE /api/todos/:id
pub async fn delete_todo(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: CurrentUser,
) -> Result<StatusCode> {
    let task_id = TaskId::new(id);
    let deleted = tally_storage::tasks::delete(&app_state.pool, &task_id, &auth.id).await?;

    if !deleted {
        return Err(ServerError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
