use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core::sessions::StoreError;
use crate::services::dashboards::DashboardError;
use crate::services::registration::FieldErrors;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    Unauthorized(&'static str),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Validation(FieldErrors),
    Internal(String),
}

impl ApiError {
    /// Log the underlying error with context and return an `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(context.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::Unauthorized("Session not found"),
            StoreError::Transition(err) => ApiError::Conflict(err.to_string()),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::CourseNotFound(_) => ApiError::NotFound(err.to_string()),
            DashboardError::Filter(_) => ApiError::BadRequest(err.to_string()),
            DashboardError::NoViewer(_) => ApiError::internal(err, "Catalog is missing records"),
        }
    }
}

fn error_body(status: StatusCode, detail: String, errors: Option<FieldErrors>) -> Response {
    (status, Json(ErrorResponse { status: status.as_u16(), detail, errors })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(message) => {
                let mut response =
                    error_body(StatusCode::UNAUTHORIZED, message.to_string(), None);
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            ApiError::BadRequest(message) => error_body(StatusCode::BAD_REQUEST, message, None),
            ApiError::NotFound(message) => error_body(StatusCode::NOT_FOUND, message, None),
            ApiError::Conflict(message) => error_body(StatusCode::CONFLICT, message, None),
            ApiError::Validation(errors) => {
                error_body(StatusCode::UNPROCESSABLE_ENTITY, errors.summary(), Some(errors))
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal server error");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, message, None)
            }
        }
    }
}
