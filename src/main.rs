//! TrafiAuth server. Token lifecycle service: issue, validate, refresh.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use trafi_core::config::AppConfig;
use trafi_core::error::AppError;
use trafi_session::password::PasswordHasher;
use trafi_session::session::{SessionManager, SessionStore};
use trafi_session::token::TokenCodec;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TRAFI_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TrafiAuth v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = trafi_database::connection::DatabasePool::connect(&config.database).await?;

    trafi_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Initialize cache ─────────────────────────────────
    tracing::info!(
        "Initializing cache (provider: {})...",
        config.cache.provider
    );
    let cache = Arc::new(trafi_cache::provider::CacheManager::new(&config.cache).await?);

    // ── Step 3: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(
        trafi_database::repositories::user::UserRepository::new(db.pool().clone()),
    );

    // ── Step 4: Initialize session system ────────────────────────
    tracing::info!("Initializing session system...");
    let password_hasher = Arc::new(PasswordHasher::new());
    let codec = TokenCodec::new(&config.auth);
    let store = SessionStore::new(Arc::clone(&cache), &config.auth);
    let session_manager = Arc::new(SessionManager::new(
        codec,
        store,
        Arc::clone(&user_repo) as Arc<dyn trafi_core::traits::CredentialStore>,
        Arc::clone(&password_hasher) as Arc<dyn trafi_core::traits::CredentialVerifier>,
    ));

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = trafi_api::state::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        cache: Arc::clone(&cache),
        user_repo: Arc::clone(&user_repo),
        password_hasher: Arc::clone(&password_hasher),
        session_manager: Arc::clone(&session_manager),
    };

    let app = trafi_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("TrafiAuth server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db.close().await;
    tracing::info!("TrafiAuth server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
