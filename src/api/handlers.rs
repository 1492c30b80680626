use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::RecommendationResponse,
    services::posters,
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    /// Number of recommendations; falls back to the configured default
    pub k: Option<usize>,
    /// Whether to look up posters (default true)
    pub posters: Option<bool>,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let dataset = state.dataset();
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "movies": dataset.catalog().len(),
            "loaded_at": dataset.loaded_at(),
        })),
    )
}

/// All movie titles in catalog order
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dataset().catalog().all_titles().to_vec())
}

/// Movies most similar to the requested title, with posters
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Query(query) = query.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    let k = query.k.unwrap_or(state.default_count);
    let with_posters = query.posters.unwrap_or(true);

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        k,
        posters = with_posters,
        "Processing recommendation request"
    );

    let ranked = state.engine.recommend_scored(&query.title, k)?;

    let recommendations = if with_posters {
        posters::enrich_with_posters(
            state.poster_provider.clone(),
            ranked,
            state.poster_settings,
        )
        .await
    } else {
        posters::without_posters(ranked)
    };

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        title: query.title,
        recommendations,
    }))
}
