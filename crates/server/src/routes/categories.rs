use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use models::{Category, CategoryInput};
use service::pagination::Page;

use crate::errors::ApiError;
use crate::state::{AppState, ListParams};

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<CategoryInput>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.catalog.categories.create(input)?;
    let location = format!("/api/categories/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// GET /api/categories
pub async fn list(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListParams>, ApiError>,
) -> Result<Json<Page<Category>>, ApiError> {
    let query = params.into_query(state.default_page_size)?;
    Ok(Json(state.catalog.categories.find_all(&query)?))
}

/// GET /api/categories/:id
pub async fn get(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, ApiError>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.catalog.categories.find_by_id(id)?))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<CategoryInput>, ApiError>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.catalog.categories.update(id, input)?))
}

/// DELETE /api/categories/:id
pub async fn delete(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, ApiError>,
) -> Result<StatusCode, ApiError> {
    state.catalog.categories.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
