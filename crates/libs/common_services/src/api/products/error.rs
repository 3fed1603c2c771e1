use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ProductsError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("A product with this name already exists")]
    NameTaken,

    #[error("Product is referenced by {references} machine(s)")]
    StillReferenced { references: i64 },

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

fn log_error(error: &ProductsError) {
    match error {
        ProductsError::Database(e) => warn!("Database query failed: {}", e),
        ProductsError::Internal(e) => warn!("Internal error: {:?}", e),
        ProductsError::NotFound(id) => info!("Product not found: {}", id),
        ProductsError::NameTaken => info!("Product name conflict."),
        ProductsError::StillReferenced { references } => {
            info!("Refused product deletion, {} references remain.", references);
        }
        ProductsError::BadRequest(message) => warn!("Products -> Bad Request: {}", message),
    }
}

impl IntoResponse for ProductsError {
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
            Self::NotFound(id) => (StatusCode::NOT_FOUND, format!("Product not found: {id}")),
            Self::NameTaken => (StatusCode::CONFLICT, self.to_string()),
            Self::StillReferenced { references } => (
                StatusCode::CONFLICT,
                format!("Product is still referenced by {references} machine(s)"),
            ),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for ProductsError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(_) => Self::NameTaken,
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
