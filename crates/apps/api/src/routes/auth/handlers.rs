//! HTTP handlers for authentication-related routes.

use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{extract_token, removal_cookie, session_cookie};
use axum::{Extension, Json, extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::{CreateUser, LoginResponse, LoginUser};
use common_services::api::auth::service::{
    authenticate_user, create_session, create_user, logout_user,
};
use common_services::database::app_user::User;
use http::HeaderMap;
use tracing::instrument;

/// Handles user login and opens a new session.
///
/// The token is returned in the body for API clients and set as an HttpOnly
/// cookie for browsers.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[instrument(skip(context, jar, payload), err(Debug))]
pub async fn login(
    State(context): State<ApiContext>,
    jar: CookieJar,
    Json(payload): Json<LoginUser>,
) -> Result<(CookieJar, Json<LoginResponse>), AuthError> {
    let user = authenticate_user(&context.pool, &payload.email, &payload.password).await?;
    let session = create_session(&context.pool, user.id).await?;

    let jar = jar.add(session_cookie(&session.token));
    Ok((
        jar,
        Json(LoginResponse {
            token: session.token,
            expires_at: session.expires_at,
            user: user.into_user(),
        }),
    ))
}

/// Handles the registration of a new user.
///
/// The first account ever registered becomes the admin.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created successfully", body = User),
        (status = 409, description = "User with this email already exists"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn register(
    State(context): State<ApiContext>,
    Json(payload): Json<CreateUser>,
) -> Result<Json<User>, AuthError> {
    let user = create_user(&context.pool, &payload).await?;
    Ok(Json(user))
}

/// Handles user logout by deleting the presented session.
///
/// Always responds 204, whether or not the token matched a session.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses(
        (status = 204, description = "Logged out"),
    )
)]
pub async fn logout(
    State(context): State<ApiContext>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<(CookieJar, StatusCode), AuthError> {
    let status = match extract_token(&headers) {
        Ok(token) => logout_user(&context.pool, &token).await?,
        Err(_) => StatusCode::NO_CONTENT,
    };
    Ok((jar.add(removal_cookie()), status))
}

/// Get current user info.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user data", body = User),
        (status = 401, description = "Authentication required"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
