//! Task queries
//!
//! Every function here takes the owning user's id and folds it into the
//! WHERE clause. A task belonging to someone else behaves exactly like a
//! task that does not exist.
use crate::error::Result;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tally_core::types::{CreateTask, Task, TaskId, UpdateTask, UserId};

fn task_from_row(row: &SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        due_date: row.get("due_date"),
        completed: row.get::<i64, _>("completed") != 0,
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Get all tasks owned by a user, due date ascending
///
/// Undated tasks sort after every dated one; created_at then id break ties
/// so the ordering is stable across calls.
pub async fn list_for_owner(pool: &SqlitePool, owner_id: &UserId) -> Result<Vec<Task>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, description, due_date, completed, owner_id, created_at, updated_at
        FROM tasks
        WHERE owner_id = ?
        ORDER BY due_date IS NULL, due_date, created_at, id
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(task_from_row).collect())
}

/// Get a task by id, scoped to its owner
pub async fn get_by_id(
    pool: &SqlitePool,
    id: &TaskId,
    owner_id: &UserId,
) -> Result<Option<Task>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, description, due_date, completed, owner_id, created_at, updated_at
        FROM tasks
        WHERE id = ? AND owner_id = ?
        LIMIT 1
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(task_from_row))
}

/// Create a new task
///
/// New tasks always start uncompleted; id and timestamps are assigned here.
pub async fn create(pool: &SqlitePool, create: &CreateTask) -> Result<Task> {
    let id = TaskId::generate();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO tasks (id, title, description, due_date, completed, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&create.title)
    .bind(&create.description)
    .bind(&create.due_date)
    .bind(&create.owner_id)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(Task {
        id,
        title: create.title.clone(),
        description: create.description.clone(),
        due_date: create.due_date.clone(),
        completed: false,
        owner_id: create.owner_id.clone(),
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Apply a partial update to a task, scoped to its owner
///
/// Fields absent from `update` keep their current value. Returns the updated
/// record, or `None` when no task with that id belongs to this owner.
/// Concurrent updates are not ordered relative to each other: the last write
/// to land wins.
pub async fn update(
    pool: &SqlitePool,
    id: &TaskId,
    owner_id: &UserId,
    update: &UpdateTask,
) -> Result<Option<Task>> {
    let Some(current) = get_by_id(pool, id, owner_id).await? else {
        return Ok(None);
    };

    let title = update.title.clone().unwrap_or(current.title);
    let description = update.description.clone().or(current.description);
    let due_date = update.due_date.clone().or(current.due_date);
    let completed = update.completed.unwrap_or(current.completed);
    let updated_at = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        UPDATE tasks
        SET title = ?, description = ?, due_date = ?, completed = ?, updated_at = ?
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(&title)
    .bind(&description)
    .bind(&due_date)
    .bind(i64::from(completed))
    .bind(&updated_at)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    Ok(Some(Task {
        id: current.id,
        title,
        description,
        due_date,
        completed,
        owner_id: current.owner_id,
        created_at: current.created_at,
        updated_at,
    }))
}

/// Delete a task, scoped to its owner
///
/// Returns `true` when a row was actually removed.
pub async fn delete(pool: &SqlitePool, id: &TaskId, owner_id: &UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
