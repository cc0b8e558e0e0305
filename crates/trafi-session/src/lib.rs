//! # trafi-session
//!
//! Token lifecycle and session-binding protocol for TrafiAuth.
//!
//! ## Modules
//!
//! - `token`: signed bearer token creation and validation (JWT, HS256)
//! - `password`: Argon2id password hashing and verification
//! - `session`: refresh-token persistence and the login/validate/refresh
//!   protocol orchestration

pub mod password;
pub mod session;
pub mod token;

pub use password::PasswordHasher;
pub use session::{SessionManager, SessionStore};
pub use token::{Claims, IssuedToken, TokenCodec, TokenPair};
