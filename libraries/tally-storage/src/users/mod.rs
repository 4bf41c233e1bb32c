//! User account queries
use crate::error::{Result, StorageError};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tally_core::types::{CreateUser, User, UserId};

/// Create a new user account
///
/// The username carries a UNIQUE constraint; inserting an existing name
/// surfaces as [`StorageError::Duplicate`].
pub async fn create(pool: &SqlitePool, create: &CreateUser) -> Result<User> {
    let id = UserId::generate();
    let created_at = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO users (id, username, password_hash, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&create.username)
    .bind(&create.password_hash)
    .bind(&created_at)
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_insert(e, "username"))?;

    Ok(User {
        id,
        username: create.username.clone(),
        created_at,
    })
}

/// Look up a user by login name
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, created_at FROM users WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| User {
        id: row.get("id"),
        username: row.get("username"),
        created_at: row.get("created_at"),
    }))
}

/// Get a user's password hash for authentication
///
/// Returns `None` when the user does not exist.
pub async fn get_password_hash(pool: &SqlitePool, user_id: &UserId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("password_hash")))
}

/// Get all users, ordered by name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, created_at FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
            created_at: row.get("created_at"),
        })
        .collect())
}
