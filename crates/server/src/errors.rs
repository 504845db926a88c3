use std::any::Any;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// HTTP-facing error. Rendered as the uniform body
/// `{timestamp, status, error, message, path}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    pub path: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self { status, error, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Failed", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", message)
    }

    pub fn status(&self) -> StatusCode { self.status }

    pub fn message(&self) -> &str { &self.message }

    pub fn body(&self, path: &str) -> ErrorBody {
        ErrorBody {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: self.status.as_u16(),
            error: self.error,
            message: self.message.clone(),
            path: path.to_string(),
        }
    }

    fn render(&self, path: &str) -> Response {
        (self.status, Json(self.body(path))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        match e {
            ServiceError::NotFound(_) => ApiError::not_found(message),
            ServiceError::InvalidReference { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, "Invalid Reference", message)
            }
            ServiceError::Conflict(_) => ApiError::new(StatusCode::CONFLICT, "Conflict", message),
            ServiceError::Model(_) => ApiError::validation(message),
            ServiceError::BadRequest(_) => ApiError::bad_request(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// The path is not known here; [`error_envelope`] fills it in on the way out.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut res = self.render("");
        res.extensions_mut().insert(self);
        res
    }
}

/// Middleware: re-render any [`ApiError`] response with the request path.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let res = next.run(req).await;
    let Some(err) = res.extensions().get::<ApiError>().cloned() else {
        return res;
    };
    if err.status.is_server_error() {
        error!(status = err.status.as_u16(), %path, message = %err.message, "request failed");
    } else {
        warn!(status = err.status.as_u16(), %path, message = %err.message, "request rejected");
    }
    err.render(&path)
}

/// `CatchPanicLayer` hook: turn a handler panic into a uniform 500.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::internal(message).into_response()
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
