//! JWT claims structure shared by access and refresh tokens.
//!
//! Access and refresh tokens are structurally identical; only the
//! caller-supplied lifetime distinguishes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims payload embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity (email) this token was issued for.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the identity from the subject claim.
    pub fn identity(&self) -> &str {
        &self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired. Expiry is exclusive:
    /// a token is expired the instant the clock reaches `exp`.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_at_boundary() {
        let now = Utc::now().timestamp();
        let at_boundary = Claims {
            sub: "a@x.com".to_string(),
            iat: now - 60,
            exp: now,
        };
        assert!(at_boundary.is_expired());

        let live = Claims {
            sub: "a@x.com".to_string(),
            iat: now,
            exp: now + 60,
        };
        assert!(!live.is_expired());
    }
}
