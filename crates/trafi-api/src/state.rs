//! Application state shared across all handlers.

use std::sync::Arc;

use trafi_cache::provider::CacheManager;
use trafi_core::config::AppConfig;
use trafi_database::connection::DatabasePool;
use trafi_database::repositories::user::UserRepository;
use trafi_session::password::PasswordHasher;
use trafi_session::session::SessionManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,

    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,
}
