pub mod categories;
pub mod locations;
pub mod resources;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::errors::{error_envelope, panic_response, ApiError};
use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn fallback(req: Request) -> ApiError {
    ApiError::not_found(format!("No handler for {} {}", req.method(), req.uri().path()))
}

async fn method_not_allowed(req: Request) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        format!("{} is not supported on {}", req.method(), req.uri().path()),
    )
}

/// CRUD routes for the three catalog entities, without the outer layers.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/locations", get(locations::list).post(locations::create))
        .route(
            "/api/locations/:id",
            get(locations::get).put(locations::update).delete(locations::delete),
        )
        .route("/api/categories", get(categories::list).post(categories::create))
        .route(
            "/api/categories/:id",
            get(categories::get).put(categories::update).delete(categories::delete),
        )
        .route("/api/resources", get(resources::list).post(resources::create))
        .route(
            "/api/resources/:id",
            get(resources::get).put(resources::update).delete(resources::delete),
        )
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(api_routes())
        .fallback(fallback)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(error_envelope))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
