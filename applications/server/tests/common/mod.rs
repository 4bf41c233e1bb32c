/// Common test utilities and fixtures
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tally_server::{api, middleware, services::AuthService, state::AppState};
use tempfile::TempDir;

/// Test database backed by a real SQLite file, cleaned up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = tally_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        tally_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }
}

/// Build the application router exactly as the server assembles it,
/// minus the static file fallback
pub async fn create_test_app() -> (Router, Arc<AuthService>, TestDb) {
    let db = TestDb::new().await;

    let auth_service = Arc::new(AuthService::new(
        "test-secret-key".to_string(),
        1, // 1 hour
    ));

    let app_state = AppState::new(db.pool.clone(), Arc::clone(&auth_service));

    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login));

    let protected_routes = Router::new()
        .route("/todos", get(api::todos::list_todos))
        .route("/todos", post(api::todos::create_todo))
        .route("/todos/:id", get(api::todos::get_todo))
        .route("/todos/:id", put(api::todos::update_todo))
        .route("/todos/:id", delete(api::todos::delete_todo))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::auth_middleware,
        ));

    let app = Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .with_state(app_state);

    (app, auth_service, db)
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
}
