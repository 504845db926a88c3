use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use models::{Location, LocationInput};
use service::pagination::Page;

use crate::errors::ApiError;
use crate::state::{AppState, ListParams};

/// POST /api/locations
pub async fn create(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<LocationInput>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.catalog.locations.create(input)?;
    let location = format!("/api/locations/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// GET /api/locations
pub async fn list(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListParams>, ApiError>,
) -> Result<Json<Page<Location>>, ApiError> {
    let query = params.into_query(state.default_page_size)?;
    Ok(Json(state.catalog.locations.find_all(&query)?))
}

/// GET /api/locations/:id
pub async fn get(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, ApiError>,
) -> Result<Json<Location>, ApiError> {
    Ok(Json(state.catalog.locations.find_by_id(id)?))
}

/// PUT /api/locations/:id
pub async fn update(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<LocationInput>, ApiError>,
) -> Result<Json<Location>, ApiError> {
    Ok(Json(state.catalog.locations.update(id, input)?))
}

/// DELETE /api/locations/:id
pub async fn delete(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, ApiError>,
) -> Result<StatusCode, ApiError> {
    state.catalog.locations.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
