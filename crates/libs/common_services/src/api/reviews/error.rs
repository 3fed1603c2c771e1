use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ReviewsError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Review not found: {0}")]
    NotFound(i32),

    #[error("Machine not found: {0}")]
    MachineNotFound(i32),

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

fn log_error(error: &ReviewsError) {
    match error {
        ReviewsError::Database(e) => warn!("Database query failed: {}", e),
        ReviewsError::Internal(e) => warn!("Internal error: {:?}", e),
        ReviewsError::NotFound(id) => info!("Review not found: {}", id),
        ReviewsError::MachineNotFound(id) => info!("Review target machine not found: {}", id),
        ReviewsError::BadRequest(message) => info!("Reviews -> Bad Request: {}", message),
    }
}

impl IntoResponse for ReviewsError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(id) => (StatusCode::NOT_FOUND, format!("Review not found: {id}")),
            Self::MachineNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Machine not found: {id}"))
            }
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for ReviewsError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
