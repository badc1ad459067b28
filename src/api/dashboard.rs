//! Dashboard API endpoint
//!
//! - GET /api/dashboard?range=today|week|month&q= (protected)

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::NewsFilter;
use crate::services::{compute_dashboard, Dashboard, TimeRange};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub range: Option<String>,
    pub q: Option<String>,
}

/// Dashboard routes (mounted behind the auth middleware)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

/// GET /api/dashboard
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Dashboard>, ApiError> {
    let range = match query.range.as_deref().map(str::trim) {
        None | Some("") => TimeRange::default(),
        Some(s) => TimeRange::parse(s)
            .ok_or_else(|| ApiError::validation_error(format!("Unknown range: {}", s)))?,
    };

    let news = state
        .news_service
        .list(&NewsFilter::default())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    let categories = state
        .category_service
        .count()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(compute_dashboard(
        &news,
        categories,
        range,
        query.q.as_deref(),
        Utc::now(),
    )))
}
