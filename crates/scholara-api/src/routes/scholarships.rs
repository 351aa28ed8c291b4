//! Scholarship catalog handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use scholara_core::models::scholarship::Scholarship;
use scholara_core::repository::{ScholarshipRepository, UserProfileRepository};
use tracing::info;

use crate::error::ApiError;
use crate::params::{CatalogQuery, CleanupResponse};
use crate::state::AppState;

fn query_params(
    params: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<CatalogQuery, ApiError> {
    params
        .map(|Query(inner)| inner)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub async fn list<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
    params: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<Vec<Scholarship>>, ApiError> {
    const CONTEXT: &str = "Error fetching scholarships";
    let params = query_params(params)?;

    let criteria = params
        .criteria()
        .map_err(|e| ApiError::from_domain(e, CONTEXT))?;
    let items = state
        .catalog
        .list_active(params.sort(), &criteria)
        .await
        .map_err(|e| ApiError::from_domain(e, CONTEXT))?;
    Ok(Json(items))
}

pub async fn search<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
    params: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<Vec<Scholarship>>, ApiError> {
    const CONTEXT: &str = "Error searching scholarships";
    let params = query_params(params)?;

    let criteria = params
        .criteria()
        .map_err(|e| ApiError::from_domain(e, CONTEXT))?;
    let items = state
        .catalog
        .search(params.query.as_deref(), params.sort(), &criteria)
        .await
        .map_err(|e| ApiError::from_domain(e, CONTEXT))?;
    Ok(Json(items))
}

pub async fn tags<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
) -> Result<Json<Vec<String>>, ApiError> {
    state
        .catalog
        .tags()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, "Error fetching tags"))
}

pub async fn detail<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
    Path(id): Path<String>,
) -> Result<Json<Scholarship>, ApiError> {
    state
        .catalog
        .get_active(&id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, "Error fetching scholarship"))
}

pub async fn cleanup_expired<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
) -> Result<Json<CleanupResponse>, ApiError> {
    let report = state
        .catalog
        .run_cleanup()
        .await
        .map_err(|e| ApiError::from_domain(e, "Error cleaning up expired scholarships"))?;

    info!(deleted = report.deleted, "Manual cleanup triggered");
    Ok(Json(CleanupResponse {
        message: "Cleanup completed",
        deleted_count: report.deleted,
    }))
}
