//! HTTP-only cookie construction for the token pair.
//!
//! Tokens ride in HTTP-only cookies so browser scripts cannot read them;
//! the same tokens are also returned in the JSON body for non-browser
//! clients. Cookie lifetime tracks the token's own expiry.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};

/// Cookie name carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie name carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Builds an HTTP-only session cookie expiring at `expires_at`.
pub fn session_cookie(
    name: &'static str,
    value: String,
    expires_at: DateTime<Utc>,
) -> Cookie<'static> {
    let remaining = (expires_at - Utc::now()).num_seconds().max(0);

    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(remaining))
        .build()
}

/// Builds an expired cookie that instructs the browser to drop `name`.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(
            ACCESS_TOKEN_COOKIE,
            "tok".to_string(),
            Utc::now() + Duration::minutes(15),
        );
        assert_eq!(cookie.name(), "access_token");
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert!(cookie.max_age().unwrap() > time::Duration::ZERO);
    }

    #[test]
    fn test_expired_timestamp_clamps_to_zero() {
        let cookie = session_cookie(
            REFRESH_TOKEN_COOKIE,
            "tok".to_string(),
            Utc::now() - Duration::hours(1),
        );
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_removal_cookie_is_immediately_expired() {
        let cookie = removal_cookie(ACCESS_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
