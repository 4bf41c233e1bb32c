/// Shared application state
use crate::services::AuthService;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Built once on startup and injected into handlers via the router; nothing
/// here is reachable as an ambient global.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: Arc<AuthService>) -> Self {
        Self { pool, auth }
    }
}
