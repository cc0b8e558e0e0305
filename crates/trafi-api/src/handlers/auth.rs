//! Auth handlers: register, login, validate, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use tracing::warn;

use trafi_core::error::AppError;
use trafi_entity::user::CreateUser;

use crate::cookies::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, removal_cookie, session_cookie,
};
use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{
    ApiResponse, LoginResponse, MessageResponse, RefreshResponse, UserResponse, ValidateResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthSubject;
use crate::handlers::validated;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    validated(&req)?;

    // Operators may raise the password floor above the schema minimum.
    let min_length = state.config.auth.password_min_length;
    if req.password.chars().count() < min_length {
        return Err(ApiError(AppError::validation(format!(
            "Password must be at least {min_length} characters"
        ))));
    }

    if state.user_repo.email_exists(&req.email).await? {
        return Err(ApiError(AppError::conflict("Email is already registered")));
    }

    let password_hash = state.password_hasher.hash_password(&req.password)?;
    let user = state
        .user_repo
        .create(&CreateUser {
            email: req.email,
            password_hash,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(user))),
    ))
}

/// POST /api/auth/login
///
/// On success the token pair is returned in the JSON body and also set
/// as HTTP-only cookies for browser clients.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    validated(&req)?;

    let tokens = state.session_manager.login(&req.email, &req.password).await?;

    // Login already succeeded; a failed timestamp update is not worth a 500.
    if let Ok(Some(user)) = state.user_repo.find_by_email(&req.email).await {
        if let Err(e) = state.user_repo.update_last_login(user.id, Utc::now()).await {
            warn!(email = %req.email, error = %e, "Failed to record last login time");
        }
    }

    let jar = jar
        .add(session_cookie(
            ACCESS_TOKEN_COOKIE,
            tokens.access_token.clone(),
            tokens.access_expires_at,
        ))
        .add(session_cookie(
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token.clone(),
            tokens.refresh_expires_at,
        ));

    Ok((
        jar,
        Json(ApiResponse::ok(LoginResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
        })),
    ))
}

/// GET /api/auth/validate
pub async fn validate(auth: AuthSubject) -> Json<ApiResponse<ValidateResponse>> {
    Json(ApiResponse::ok(ValidateResponse {
        email: auth.email,
        expires_at: auth.expires_at,
    }))
}

/// POST /api/auth/refresh
///
/// The refresh token is taken from its cookie when present, otherwise
/// from the JSON body.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> ApiResult<(CookieJar, Json<ApiResponse<RefreshResponse>>)> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or(body.map(|Json(req)| req.refresh_token))
        .ok_or_else(|| ApiError(AppError::unauthorized("No refresh token presented")))?;

    let access = state.session_manager.refresh(&refresh_token).await?;

    let jar = jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        access.token.clone(),
        access.expires_at,
    ));

    Ok((
        jar,
        Json(ApiResponse::ok(RefreshResponse {
            access_token: access.token,
            access_expires_at: access.expires_at,
        })),
    ))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthSubject,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<MessageResponse>>)> {
    state.session_manager.revoke(&auth.email).await?;

    let jar = jar
        .add(removal_cookie(ACCESS_TOKEN_COOKIE))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE));

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out successfully".to_string(),
        })),
    ))
}
