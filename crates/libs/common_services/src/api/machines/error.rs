use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum MachinesError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Machine not found: {0}")]
    NotFound(i32),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

fn log_error(error: &MachinesError) {
    match error {
        MachinesError::Database(e) => warn!("Database query failed: {}", e),
        MachinesError::Internal(e) => warn!("Internal error: {:?}", e),
        MachinesError::NotFound(id) => warn!("Machine not found: {}", id),
        MachinesError::Forbidden(message) => warn!("Machines -> Forbidden: {}", message),
        MachinesError::BadRequest(message) => warn!("Machines -> Bad Request: {}", message),
    }
}

impl IntoResponse for MachinesError {
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
            Self::NotFound(id) => (StatusCode::NOT_FOUND, format!("Machine not found: {id}")),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, format!("Forbidden: {message}")),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for MachinesError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
