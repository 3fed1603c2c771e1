use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::CreateUser;
use crate::api::auth::token::{generate_session_token, is_plausible_token};
use crate::database::DbError;
use crate::database::app_user::{User, UserRole, UserWithPassword};
use crate::database::session::Session;
use crate::database::session_store::SessionStore;
use crate::database::user_store::UserStore;
use app_state::constants;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, info, instrument};

/// Lower-cases and trims an email so uniqueness is case-insensitive at write
/// time and lookups match regardless of input casing.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == ' ')
        && !name.starts_with(' ')
        && !name.ends_with(' ')
}

/// Authenticates a user based on email and password.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` if the email or password is incorrect.
/// * `AuthError::AccountDeactivated` if the account was deactivated.
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    let email = normalize_email(email);
    let user = UserStore::find_by_email_with_password(pool, &email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    // A broken stored hash must read as a failed login, not a 500.
    let valid = verify_password(password.as_bytes(), &user.password).unwrap_or(false);
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }
    if !user.is_active {
        return Err(AuthError::AccountDeactivated);
    }

    Ok(user)
}

/// Creates a new user in the database.
///
/// The very first account becomes the admin; everyone after that registers as
/// a machine owner.
///
/// # Errors
///
/// * `AuthError::UserAlreadyExists` if a user with the given email already exists.
/// * `AuthError::InvalidCredentials` when the name contains illegal characters.
#[instrument(skip(pool, payload))]
pub async fn create_user(pool: &PgPool, payload: &CreateUser) -> Result<User, AuthError> {
    if !is_valid_name(&payload.name) {
        return Err(AuthError::InvalidCredentials);
    }
    let email = normalize_email(&payload.email);
    let hashed = hash_password(payload.password.as_bytes())?;
    info!("Creating user email={}, name={}", email, payload.name);

    let is_first_user = UserStore::count(pool).await? == 0;
    let role = if is_first_user {
        UserRole::Admin
    } else {
        UserRole::Owner
    };

    UserStore::create(pool, &email, &payload.name, &hashed, role)
        .await
        .map_err(|err| match err {
            DbError::UniqueViolation(_) => AuthError::UserAlreadyExists,
            other => AuthError::Internal(other.into()),
        })
}

/// Issues a new session for a user. Sessions are fixed-lifetime capabilities;
/// concurrent sessions for the same user are expected (multi-device).
pub async fn create_session(pool: &PgPool, user_id: i32) -> Result<Session, AuthError> {
    let token = generate_session_token();
    let expires_at = Utc::now() + Duration::hours(constants().auth.session_expiry_hours);
    let session = SessionStore::create(pool, user_id, &token, expires_at).await?;
    Ok(session)
}

/// Resolves a token to its session and user.
///
/// Returns `None` for unknown tokens, for expired sessions (the stale row is
/// purged as a side effect), and for sessions whose account was deactivated.
pub async fn verify_session(
    pool: &PgPool,
    token: &str,
) -> Result<Option<(Session, User)>, AuthError> {
    if !is_plausible_token(token) {
        return Ok(None);
    }

    let Some(row) = SessionStore::find_by_token(pool, token).await? else {
        return Ok(None);
    };

    if row.expires_at <= Utc::now() {
        // Lazy cleanup: deleting is idempotent, so racing requests are fine.
        SessionStore::delete_by_token(pool, token).await?;
        debug!("Purged expired session for user {}", row.user_id);
        return Ok(None);
    }

    let (session, user) = row.split();
    if !user.is_active {
        return Ok(None);
    }

    Ok(Some((session, user)))
}

/// Deletes the session matching the provided token, logging the user out.
pub async fn logout_user(pool: &PgPool, token: &str) -> Result<StatusCode, AuthError> {
    if is_plausible_token(token) {
        SessionStore::delete_by_token(pool, token).await?;
    }
    // Logout should always appear successful to prevent token enumeration attacks.
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_case_normalized() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("bob@host.de"), "bob@host.de");
    }

    #[test]
    fn name_validation() {
        assert!(is_valid_name("Alice Smith"));
        assert!(is_valid_name("Müller2"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(" leading"));
        assert!(!is_valid_name("trailing "));
        assert!(!is_valid_name("no<script>"));
    }
}
