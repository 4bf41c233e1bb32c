/// Task domain types
use super::ids::{TaskId, UserId};
use crate::error::{Result, TallyError};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A to-do item owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier
    pub id: TaskId,

    /// Short summary, required and non-empty
    pub title: String,

    /// Free-form details
    pub description: Option<String>,

    /// When the task is due (RFC 3339), if scheduled
    pub due_date: Option<String>,

    /// Whether the task has been completed
    pub completed: bool,

    /// Owning user; every read and write is scoped to this
    pub owner_id: UserId,

    /// Creation timestamp (RFC 3339, store-managed)
    pub created_at: String,

    /// Last modification timestamp (RFC 3339, store-managed)
    pub updated_at: String,
}

/// Data for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub owner_id: UserId,
}

impl CreateTask {
    /// Validate required fields before persistence
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TallyError::invalid_input("title is required"));
        }
        Ok(())
    }
}

/// Data for a partial task update (absent fields are left unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTask {
    /// Validate that supplied fields keep the record well-formed
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(TallyError::invalid_input("title must not be empty"));
            }
        }
        Ok(())
    }

    /// True when no field is supplied at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }
}

/// Parse a client-supplied due date and normalize it to RFC 3339
///
/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date (interpreted
/// as midnight UTC, matching how the browser date input submits values).
pub fn normalize_due_date(raw: &str) -> Result<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc).to_rfc3339());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().to_rfc3339());
    }

    Err(TallyError::invalid_input(format!(
        "invalid due date: {raw}"
    )))
}
