//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and token lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Must not be empty.
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Minimum password length for registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Deadline for each session-store operation in seconds.
    #[serde(default = "default_store_timeout")]
    pub store_op_timeout_seconds: u64,
}

impl AuthConfig {
    /// Builds a config with the given secret and reference lifetimes,
    /// for use in tests.
    pub fn for_tests(secret: &str) -> Self {
        Self {
            jwt_secret: secret.to_string(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min(),
            store_op_timeout_seconds: default_store_timeout(),
        }
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24
}

fn default_password_min() -> usize {
    8
}

fn default_store_timeout() -> u64 {
    5
}
