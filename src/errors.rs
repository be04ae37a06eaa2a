use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    /// Failure reported by the query execution collaborator. Connectivity,
    /// syntax and constraint errors all arrive here undifferentiated.
    #[error("Query failed: {0}")]
    Query(String),

    /// Anything raised while orchestrating a page load, normalized to a
    /// message. Never retried.
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Validation errors")]
    Validation(#[from] ValidationErrors),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Query(message) => {
                tracing::error!("Query failure: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            AppError::Unexpected(message) => {
                tracing::error!("Unexpected failure: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            AppError::Validation(errors) => {
                let mut messages = Vec::new();
                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        let msg = error.message.as_ref().map_or_else(
                            || format!("Field '{}' is invalid", field),
                            |m| format!("Field '{}': {}", field, m),
                        );
                        messages.push(msg);
                    }
                }
                (StatusCode::UNPROCESSABLE_ENTITY, messages.join("; "))
            }
        };

        // Uniform error body at the page boundary.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
