//! Authentication API endpoints
//!
//! Handles HTTP requests for user authentication:
//! - POST /api/auth/register - Account registration
//! - POST /api/auth/login - Login, returns the access token
//! - POST /api/auth/logout - Clears the token cookie
//! - GET /api/auth/me - Token check (protected)

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{token_cookie, ApiError, AppState};
use crate::services::user::{LoginInput, RegisterInput, UserServiceError};

/// Token cookie lifetime
const TOKEN_COOKIE_MAX_AGE: u64 = 7 * 24 * 60 * 60;

/// Request body for registration and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
}

impl From<crate::models::User> for UserResponse {
    fn from(user: crate::models::User) -> Self {
        Self { email: user.email }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
}

/// Build public auth routes (no auth required)
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Build protected auth routes (requires auth middleware)
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

fn map_user_error(e: UserServiceError) -> ApiError {
    match e {
        UserServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        UserServiceError::EmailTaken => ApiError::validation_error(e.to_string()),
        UserServiceError::EmailNotRegistered => ApiError::not_found(e.to_string()),
        UserServiceError::IncorrectPassword => ApiError::unauthorized(e.to_string()),
        UserServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
    }
}

/// POST /api/auth/register - Account registration
async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .register(RegisterInput::new(body.email, body.password))
        .await
        .map_err(map_user_error)?;

    Ok(Json(MessageResponse {
        message: "Account created".to_string(),
    }))
}

/// POST /api/auth/login - Login
///
/// Also sets the token cookie so browser clients are authenticated on
/// subsequent requests.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .user_service
        .login(LoginInput::new(body.email, body.password))
        .await
        .map_err(map_user_error)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        token_cookie(&outcome.token, TOKEN_COOKIE_MAX_AGE)?,
    );

    Ok((
        headers,
        Json(LoginResponse {
            token: outcome.token,
            user: outcome.user.into(),
        }),
    ))
}

/// POST /api/auth/logout - Clear the token cookie
async fn logout() -> Result<impl IntoResponse, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, token_cookie("", 0)?);

    Ok((
        headers,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

/// GET /api/auth/me - Succeeds only with a valid token
async fn me() -> Json<MeResponse> {
    Json(MeResponse { authenticated: true })
}
