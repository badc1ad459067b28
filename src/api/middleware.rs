//! API middleware and shared handler types
//!
//! - `AppState` shared by every handler
//! - `ApiError` JSON error body and its status mapping
//! - `ApiPath` extractor with JSON rejections
//! - `require_auth` token guard for write routes

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, FromRequestParts, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::{CategoryService, NewsService, UserService};

/// Name of the cookie carrying the access token
pub const TOKEN_COOKIE: &str = "token";

/// `Set-Cookie` value for the token cookie; `max_age` 0 expires it
pub fn token_cookie(value: &str, max_age: u64) -> Result<HeaderValue, ApiError> {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        TOKEN_COOKIE, value, max_age
    );
    HeaderValue::from_str(&cookie).map_err(|e| ApiError::internal_error(e.to_string()))
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub news_service: Arc<NewsService>,
    pub category_service: Arc<CategoryService>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: code.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "CONFLICT" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(message = %self.message, "Request failed");
        }
        (status, Json(self)).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation_error(rejection.body_text())
    }
}

/// `Path` extractor whose rejection is an `ApiError` body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Extract the access token from the request
///
/// `Authorization: Bearer <token>` wins over the `token` cookie.
fn extract_token(request: &Request) -> Option<String> {
    if let Some(auth_header) = request.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.trim().to_string());
            }
        }
    }

    if let Some(cookie_header) = request.headers().get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie
                    .strip_prefix(TOKEN_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Authentication middleware
///
/// A rejected request also gets an expired token cookie so the client drops
/// its stale token.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let error = match extract_token(&request) {
        None => ApiError::unauthorized("Missing authentication token"),
        Some(token) if state.user_service.validate_token(&token) => {
            return next.run(request).await;
        }
        Some(_) => {
            tracing::debug!(path = %request.uri().path(), "Rejected invalid token");
            ApiError::unauthorized("Invalid token")
        }
    };

    let mut response = error.into_response();
    if let Ok(expired) = token_cookie("", 0) {
        response.headers_mut().insert(header::SET_COOKIE, expired);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(name: header::HeaderName, value: &str) -> Request {
        Request::builder()
            .header(name, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let request = request_with(header::AUTHORIZATION, "Bearer abc123");
        assert_eq!(extract_token(&request).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_extract_cookie_token() {
        let request = request_with(header::COOKIE, "theme=dark; token=abc123; other=1");
        assert_eq!(extract_token(&request).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cookie_prefix_must_match_whole_name() {
        let request = request_with(header::COOKIE, "tokenx=abc123");
        assert_eq!(extract_token(&request), None);
    }

    #[test]
    fn test_missing_token() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(extract_token(&request), None);

        let basic = request_with(header::AUTHORIZATION, "Basic Zm9vOmJhcg==");
        assert_eq!(extract_token(&basic), None);
    }

    #[test]
    fn test_token_cookie() {
        let cookie = token_cookie("abc", 60).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "token=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );
        assert!(token_cookie("", 0).unwrap().to_str().unwrap().ends_with("Max-Age=0"));
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ApiError::validation_error("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::new("SOMETHING_ELSE", "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
