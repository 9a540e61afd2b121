/// Mapping of submission failures to HTTP responses

use crate::error::{FieldError, SubmissionError, ValidationErrors};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] SubmissionError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<FieldError> for ApiError {
    fn from(error: FieldError) -> Self {
        ApiError(ValidationErrors(vec![error]).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            SubmissionError::Validation(errors) => {
                tracing::warn!("⚠️ Rejected request: {}", errors);
                let body = json!({
                    "error": errors.to_string(),
                    "code": "VALIDATION_ERROR",
                    "fields": errors.0,
                });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            other => {
                tracing::error!("❌ Submission failed: {:#}", other);
                let body = json!({
                    "error": other.to_string(),
                    "code": "INTERNAL_ERROR",
                });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}
