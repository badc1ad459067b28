//! News API endpoints
//!
//! Public:
//! - GET /api/news - List news (`status`, `q` filters)
//! - GET /api/news/{id} - Get one item
//! - POST /api/news/{id}/view - Record a view
//!
//! Protected:
//! - POST /api/news - Create
//! - PUT /api/news/{id} - Update
//! - DELETE /api/news/{id} - Delete
//! - POST /api/news/{id}/publish, POST /api/news/{id}/unpublish

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, ApiPath, AppState};
use crate::models::{CreateNewsInput, News, NewsFilter, NewsStatus, UpdateNewsInput};
use crate::services::NewsServiceError;

/// Query parameters for listing news
#[derive(Debug, Default, Deserialize)]
pub struct ListNewsQuery {
    pub status: Option<String>,
    pub q: Option<String>,
}

impl ListNewsQuery {
    fn into_filter(self) -> Result<NewsFilter, ApiError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(
                NewsStatus::parse(s)
                    .ok_or_else(|| ApiError::validation_error(format!("Unknown status: {}", s)))?,
            ),
        };
        Ok(NewsFilter { status, query: self.q })
    }
}

/// Response for a recorded view
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub id: i64,
    pub views: usize,
}

impl From<News> for ViewResponse {
    fn from(news: News) -> Self {
        Self {
            id: news.id,
            views: news.view_count(),
        }
    }
}

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_news))
        .route("/{id}", get(get_news))
        .route("/{id}/view", post(record_view))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_news))
        .route("/{id}", axum::routing::put(update_news).delete(delete_news))
        .route("/{id}/publish", post(publish_news))
        .route("/{id}/unpublish", post(unpublish_news))
}

fn map_news_error(e: NewsServiceError) -> ApiError {
    match e {
        NewsServiceError::NotFound(_) => ApiError::not_found(e.to_string()),
        NewsServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        NewsServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
    }
}

/// GET /api/news
async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ListNewsQuery>,
) -> Result<Json<Vec<News>>, ApiError> {
    let filter = query.into_filter()?;
    let news = state.news_service.list(&filter).await.map_err(map_news_error)?;
    Ok(Json(news))
}

/// GET /api/news/{id}
async fn get_news(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<News>, ApiError> {
    let news = state.news_service.get(id).await.map_err(map_news_error)?;
    Ok(Json(news))
}

/// POST /api/news
async fn create_news(
    State(state): State<AppState>,
    Json(body): Json<CreateNewsInput>,
) -> Result<(StatusCode, Json<News>), ApiError> {
    let news = state.news_service.create(body).await.map_err(map_news_error)?;
    Ok((StatusCode::CREATED, Json(news)))
}

/// PUT /api/news/{id}
async fn update_news(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Json(body): Json<UpdateNewsInput>,
) -> Result<Json<News>, ApiError> {
    let news = state.news_service.update(id, body).await.map_err(map_news_error)?;
    Ok(Json(news))
}

/// DELETE /api/news/{id}
async fn delete_news(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.news_service.delete(id).await.map_err(map_news_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/news/{id}/view
async fn record_view(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ViewResponse>, ApiError> {
    let news = state.news_service.record_view(id).await.map_err(map_news_error)?;
    Ok(Json(news.into()))
}

/// POST /api/news/{id}/publish
async fn publish_news(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<News>, ApiError> {
    let news = state.news_service.publish(id).await.map_err(map_news_error)?;
    Ok(Json(news))
}

/// POST /api/news/{id}/unpublish
async fn unpublish_news(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<News>, ApiError> {
    let news = state.news_service.unpublish(id).await.map_err(map_news_error)?;
    Ok(Json(news))
}
