use crate::api_state::ApiContext;
use app_state::constants;
use axum::extract::{FromRequestParts, State};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use color_eyre::eyre::eyre;
use common_services::api::auth::error::AuthError;
use http::HeaderMap;
use http::header;
use http::request::Parts;
use time::Duration;

/// Browsers authenticate with this cookie; API clients use the
/// `Authorization: Bearer` header. Both carry the same session token.
pub const SESSION_COOKIE: &str = "session";

pub async fn extract_context<S>(parts: &mut Parts, state: &S) -> Result<ApiContext, AuthError>
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    match State::<ApiContext>::from_request_parts(parts, state).await {
        Ok(State(context)) => Ok(context),
        Err(_e) => Err(AuthError::Internal(eyre!(
            "Server state is not configured correctly."
        ))),
    }
}

/// Get the session token from the Authorization header, falling back to the
/// session cookie.
pub fn extract_token(headers: &HeaderMap) -> Result<String, AuthError> {
    if let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        return auth_header
            .strip_prefix("Bearer ")
            .map(ToOwned::to_owned)
            .ok_or(AuthError::InvalidToken);
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .ok_or(AuthError::MissingToken)
}

/// The cookie set on login. Max-Age mirrors the session lifetime so browsers
/// keep it across restarts; the server-side session row stays the source of
/// truth for expiry.
#[must_use]
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_owned()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::hours(constants().auth.session_expiry_hours))
        .build()
}

/// An immediately-expiring replacement cookie, set on logout.
#[must_use]
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}
