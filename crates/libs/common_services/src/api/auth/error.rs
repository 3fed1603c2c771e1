use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    InvalidCredentials,
    SessionExpiredOrNotFound,
    AccountDeactivated,
    UserAlreadyExists,
    UserNotFound,
    PermissionDenied { user_email: String, path: String },
    Internal(eyre::Report),
}

// Helper function to log failures.
fn log_auth_failure(error: &AuthError) {
    match error {
        AuthError::MissingToken => warn!("Authentication failed: Missing session token."),
        AuthError::InvalidToken => warn!("Authentication failed: Invalid token provided."),
        AuthError::InvalidCredentials => {
            info!("Authentication failed: Invalid credentials provided.");
        } // Use info to reduce noise
        AuthError::SessionExpiredOrNotFound => info!("Session not found or expired."),
        AuthError::AccountDeactivated => info!("Authentication failed: account is deactivated."),
        AuthError::UserAlreadyExists => info!("Registration failed: User already exists."),
        AuthError::UserNotFound => warn!("Authentication failed: User from session not found."),
        AuthError::PermissionDenied { user_email, path } => {
            warn!(
                "Authorization failed: User {} tried to access restricted endpoint: {}",
                user_email, path
            );
        }
        AuthError::Internal(e) => {
            tracing::error!("Internal server error during authentication: {:?}", e);
        }
    }
}

// Implementation to turn an AuthError into a user-facing response.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        log_auth_failure(&self);

        let (status, error_message) = match self {
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            // A deactivated account is indistinguishable from a bad token on
            // the wire; only the log tells them apart.
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::UserNotFound
            | AuthError::AccountDeactivated
            | AuthError::SessionExpiredOrNotFound => {
                (StatusCode::UNAUTHORIZED, "Authentication failed")
            }
            AuthError::UserAlreadyExists => (
                StatusCode::CONFLICT,
                "A user with this email already exists",
            ),
            AuthError::PermissionDenied { .. } => (StatusCode::FORBIDDEN, "Permission denied"),
            AuthError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred",
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

// This allows us to use `?` to convert `sqlx::Error` and other errors into `AuthError::Internal`.
impl<E> From<E> for AuthError
where
    E: Into<eyre::Report>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
