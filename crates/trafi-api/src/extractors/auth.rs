//! `AuthSubject` extractor: pulls the access token from the request,
//! validates it, and injects the authenticated identity.
//!
//! The token is read from the `Authorization: Bearer` header first, then
//! from the `access_token` cookie, so both API clients and browsers work.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};

use trafi_core::error::AppError;

use crate::cookies::ACCESS_TOKEN_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct AuthSubject {
    /// Email address the token was issued for.
    pub email: String,
    /// Token expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl FromRequestParts<AppState> for AuthSubject {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);

        let token = match bearer {
            Some(token) => token,
            None => {
                let jar = CookieJar::from_headers(&parts.headers);
                jar.get(ACCESS_TOKEN_COOKIE)
                    .map(|c| c.value().to_string())
                    .ok_or_else(|| {
                        ApiError(AppError::unauthorized("No access token presented"))
                    })?
            }
        };

        let claims = state.session_manager.validate(&token)?;

        Ok(AuthSubject {
            expires_at: claims.expires_at(),
            email: claims.sub,
        })
    }
}
