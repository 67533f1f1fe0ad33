use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::quiz::QuizError;
use crate::telemetry::QUIZ_DRAWS;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request")]
    BadRequest,
    #[error("Unprocessable")]
    Unprocessable,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Internal Server Error")]
    Internal,
    #[error("Internal Server Error")]
    Database(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Store failures on endpoints that treat any failure as bad input.
    pub fn bad_input(error: sqlx::Error) -> Self {
        tracing::warn!("Rejecting request after store failure: {error}");
        ApiError::BadRequest
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(error) = &self {
            tracing::error!("Database error: {error:?}");
        }
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Malformed JSON body: {}", rejection.body_text());
        ApiError::BadRequest
    }
}

// `<int:id>` style routes: a segment that is not an id matches nothing
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Unmatched path parameter: {}", rejection.body_text());
        ApiError::NotFound
    }
}

impl From<QuizError> for ApiError {
    fn from(error: QuizError) -> Self {
        match error {
            QuizError::CategoryNotFound(name) => {
                QUIZ_DRAWS.with_label_values(&["unknown_category"]).inc();
                tracing::info!("Quiz requested for unknown category '{name}'");
                ApiError::BadRequest
            }
            QuizError::Exhausted => {
                QUIZ_DRAWS.with_label_values(&["exhausted"]).inc();
                ApiError::Unprocessable
            }
            QuizError::Database(error) => ApiError::Database(error),
        }
    }
}
