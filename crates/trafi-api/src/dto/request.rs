//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, used as the login identity.
    #[validate(email(message = "Email address is malformed"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body. Optional; the refresh token may also
/// arrive in its cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_malformed_email() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "longenough".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let req = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "short".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_accepts_valid_input() {
        let req = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let req = LoginRequest {
            email: String::new(),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
