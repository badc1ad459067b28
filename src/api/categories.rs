//! Category API endpoints
//!
//! - GET /api/categories - List categories
//! - GET /api/categories/{id} - Get one category
//! - POST /api/categories - Create (protected)
//! - DELETE /api/categories/{id} - Delete (protected)

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::api::middleware::{ApiError, ApiPath, AppState};
use crate::models::{Category, CreateCategoryInput};
use crate::services::CategoryServiceError;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/{id}", get(get_category))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_category))
        .route("/{id}", delete(delete_category))
}

fn map_category_error(e: CategoryServiceError) -> ApiError {
    match e {
        CategoryServiceError::DuplicateName(_) => ApiError::conflict(e.to_string()),
        CategoryServiceError::NotFound(_) => ApiError::not_found(e.to_string()),
        CategoryServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        CategoryServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
    }
}

/// GET /api/categories
async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state
        .category_service
        .list()
        .await
        .map_err(map_category_error)?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Category>, ApiError> {
    state
        .category_service
        .get_by_id(id)
        .await
        .map_err(map_category_error)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Category not found: {}", id)))
}

/// POST /api/categories
async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state
        .category_service
        .create(body)
        .await
        .map_err(map_category_error)?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /api/categories/{id}
async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .category_service
        .delete(id)
        .await
        .map_err(map_category_error)?;
    Ok(StatusCode::NO_CONTENT)
}
