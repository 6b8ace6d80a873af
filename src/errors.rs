use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Request-boundary error taxonomy. Every variant maps to a structured
/// `{"success": false, "message": ...}` body; store failures stay opaque to
/// the caller and are logged server-side.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("validation failed")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Policy(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Invalid(_) | ApiError::Policy(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Database(e) = self {
            log::error!("database error: {e}");
            return HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": "Server Error" }));
        }

        let mut body = json!({ "success": false, "message": self.to_string() });
        if let ApiError::Invalid(errors) = self {
            body["errors"] = serde_json::to_value(errors).unwrap_or(serde_json::Value::Null);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
