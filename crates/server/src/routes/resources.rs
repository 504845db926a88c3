use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use models::{Resource, ResourceInput};
use service::pagination::Page;

use crate::errors::ApiError;
use crate::state::{AppState, ListParams};

/// POST /api/resources
pub async fn create(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<ResourceInput>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.catalog.resources.create(input)?;
    let location = format!("/api/resources/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// GET /api/resources
pub async fn list(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListParams>, ApiError>,
) -> Result<Json<Page<Resource>>, ApiError> {
    let query = params.into_query(state.default_page_size)?;
    Ok(Json(state.catalog.resources.find_all(&query)?))
}

/// GET /api/resources/:id
pub async fn get(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, ApiError>,
) -> Result<Json<Resource>, ApiError> {
    Ok(Json(state.catalog.resources.find_by_id(id)?))
}

/// PUT /api/resources/:id
pub async fn update(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<ResourceInput>, ApiError>,
) -> Result<Json<Resource>, ApiError> {
    Ok(Json(state.catalog.resources.update(id, input)?))
}

/// DELETE /api/resources/:id
pub async fn delete(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, ApiError>,
) -> Result<StatusCode, ApiError> {
    state.catalog.resources.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
