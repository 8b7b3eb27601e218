use axum::{Json, http::StatusCode, response::IntoResponse};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::types::Envelope;

#[derive(Debug, ThisError)]
pub enum CartError {
    /// Malformed path segment or query filter.
    #[error("{0}")]
    BadRequest(String),

    /// Request body failed field-level validation.
    #[error("{0}")]
    Validation(String),

    /// The referenced list does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),
}

impl CartError {
    pub fn invalid_id() -> Self {
        CartError::BadRequest("Invalid ID format".to_string())
    }

    /// Item routes name the offending id explicitly.
    pub fn invalid_list_id() -> Self {
        CartError::BadRequest("Invalid grocery list ID format".to_string())
    }

    pub fn list_not_found() -> Self {
        CartError::NotFound("Grocery list not found".to_string())
    }

    pub fn name_required() -> Self {
        CartError::Validation("Name is required and must be a string".to_string())
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            CartError::BadRequest(msg) | CartError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Envelope::<()>::failure(msg, None))
            }
            CartError::NotFound(msg) => (StatusCode::NOT_FOUND, Envelope::<()>::failure(msg, None)),
            CartError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Envelope::<()>::failure(
                    "An internal server error occurred",
                    Some(e.to_string()),
                ),
            ),
        };
        (status, Json(body)).into_response()
    }
}
