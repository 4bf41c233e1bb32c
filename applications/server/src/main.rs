/// Tally Server - Multi-user to-do service
use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tally_core::types::CreateUser;
use tally_server::{api, config::ServerConfig, middleware, services::AuthService, state::AppState};
use tower::ServiceExt;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tally-server")]
#[command(about = "Tally multi-user to-do server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user account
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all user accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser { username, password } => {
            add_user(&username, &password).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Tally Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = tally_storage::create_pool(&config.storage.database_url).await?;
    tally_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_expiration_hours,
    ));
    tracing::info!("Auth service initialized");

    // Build application state
    let app_state = AppState::new(pool, Arc::clone(&auth_service));

    // Build router
    let app = create_router(app_state, auth_service);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(app_state: AppState, auth_service: Arc<AuthService>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login));

    // Protected routes (auth required)
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

    // Static file serving for the web client (SPA with fallback to index.html)
    let web_dir =
        PathBuf::from(std::env::var("TALLY_WEB_DIR").unwrap_or_else(|_| "./web".to_string()));

    let spa_fallback = move |req: Request<Body>| {
        let web_dir = web_dir.clone();
        async move {
            // Try to serve the file directly
            let path = req.uri().path().trim_start_matches('/');
            let file_path = web_dir.join(path);

            if file_path.exists() && file_path.is_file() {
                // Serve the actual file
                match ServeDir::new(&web_dir).oneshot(req).await {
                    Ok(res) => res.into_response(),
                    Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                }
            } else {
                // SPA fallback: serve index.html
                let index_path = web_dir.join("index.html");
                if index_path.exists() {
                    match tokio::fs::read(&index_path).await {
                        Ok(contents) => Response::builder()
                            .status(StatusCode::OK)
                            .header("content-type", "text/html; charset=utf-8")
                            .body(Body::from(contents))
                            .map_or_else(
                                |_| StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                                IntoResponse::into_response,
                            ),
                        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                    }
                } else {
                    // No web client available
                    StatusCode::NOT_FOUND.into_response()
                }
            }
        }
    };

    // Combine routes
    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .fallback(spa_fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn add_user(username: &str, password: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = tally_storage::create_pool(&config.storage.database_url).await?;
    tally_storage::run_migrations(&pool).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_expiration_hours,
    );

    let password_hash = auth_service.hash_password(password)?;
    let create = CreateUser {
        username: username.trim().to_string(),
        password_hash,
    };
    create.validate()?;

    let user = tally_storage::users::create(&pool, &create).await?;
    tracing::info!("Created user {} ({})", user.username, user.id);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = tally_storage::create_pool(&config.storage.database_url).await?;
    tally_storage::run_migrations(&pool).await?;

    let users = tally_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.id, user.username);
    }

    Ok(())
}
