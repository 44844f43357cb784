use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{
    ProfileSummary, RecommendationRequest, RecommendationResponse, SearchParams, SearchResults,
};
use crate::services::{profile_analyzer, recommendations};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Recommends podcasts for the profile behind a LinkedIn URL
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload?;
    let linkedin_url = request
        .linkedin_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::Validation("LinkedIn URL is required".to_string()))?;
    let wants_featured = request.wants_to_be_featured;

    tracing::info!(
        request_id = %request_id,
        wants_featured,
        "Processing recommendation request"
    );

    let profile = state.profiles.fetch_profile(&linkedin_url).await?;
    let analysis = profile_analyzer::analyze(&profile.profile, wants_featured)?;

    let catalog = state.catalog.get_all_podcasts().await;
    let recommendations = recommendations::recommend(&analysis, wants_featured, &catalog);

    tracing::info!(
        request_id = %request_id,
        catalog = catalog.len(),
        recommendations = recommendations.len(),
        "Recommendations ready"
    );

    Ok(Json(RecommendationResponse {
        recommendations,
        profile: ProfileSummary::new(&profile, &analysis, wants_featured),
    }))
}

/// Searches the podcast catalog
pub async fn search_podcasts(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<SearchResults>> {
    let Query(params) = query?;
    let categories = params.category_filter();
    let results = state
        .catalog
        .search(&params.q, params.offset, params.limit, categories.as_deref())
        .await;
    Ok(Json(results))
}
