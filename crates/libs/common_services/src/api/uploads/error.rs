use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Machine not found: {0}")]
    MachineNotFound(i32),

    #[error("Product not found: {0}")]
    ProductNotFound(i32),

    #[error("Photo not found: {0}")]
    PhotoNotFound(i32),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Upload too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

fn log_error(error: &UploadError) {
    match error {
        UploadError::Database(e) => warn!("Database query failed: {}", e),
        UploadError::Internal(e) => warn!("Internal error: {:?}", e),
        UploadError::Io(e) => warn!("Upload I/O failed: {}", e),
        UploadError::MachineNotFound(id) => info!("Upload target machine not found: {}", id),
        UploadError::ProductNotFound(id) => info!("Upload target product not found: {}", id),
        UploadError::PhotoNotFound(id) => info!("Photo not found: {}", id),
        UploadError::Forbidden(message) => info!("Upload forbidden: {}", message),
        UploadError::UnsupportedMediaType(name) => info!("Rejected upload of {}", name),
        UploadError::TooLarge { size, max } => {
            info!("Rejected oversized upload: {} > {}", size, max);
        }
        UploadError::BadRequest(message) => info!("Uploads -> Bad Request: {}", message),
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) | Self::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::MachineNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Machine not found: {id}"))
            }
            Self::ProductNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Product not found: {id}"))
            }
            Self::PhotoNotFound(id) => (StatusCode::NOT_FOUND, format!("Photo not found: {id}")),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            Self::UnsupportedMediaType(name) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported media type: {name}"),
            ),
            Self::TooLarge { size, max } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Upload of {size} bytes exceeds the limit of {max} bytes"),
            ),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for UploadError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
