//! # trafi-database
//!
//! PostgreSQL connection management and repository implementations
//! for TrafiAuth.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::user::UserRepository;
