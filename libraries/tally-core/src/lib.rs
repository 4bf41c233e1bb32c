//! Tally Core
//!
//! Platform-agnostic domain types and error handling for Tally.
//!
//! This crate defines:
//! - **Domain Types**: `User`, `Task` and their create/update payloads
//! - **Id Newtypes**: `UserId`, `TaskId` (UUID strings)
//! - **Error Handling**: unified `TallyError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tally_core::types::{CreateTask, TaskId, UserId};
//!
//! let owner = UserId::generate();
//! let create = CreateTask {
//!     title: "Buy milk".to_string(),
//!     description: None,
//!     due_date: None,
//!     owner_id: owner,
//! };
//! assert!(create.validate().is_ok());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TallyError};
pub use types::{CreateTask, CreateUser, Task, TaskId, UpdateTask, User, UserId};
