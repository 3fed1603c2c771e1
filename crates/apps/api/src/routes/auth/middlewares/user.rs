use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{extract_context, extract_token};
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::service::verify_session;
use common_services::database::app_user::User;

/// Extractor that requires a valid session. Inserts the resolved [`User`] into
/// request extensions so downstream handlers and middleware can read it.
#[derive(Clone, Debug)]
pub struct ApiUser(pub User);

impl<S> FromRequestParts<S> for ApiUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)?;
        let context = extract_context(parts, state).await?;
        let (_session, user) = verify_session(&context.pool, &token)
            .await?
            .ok_or(AuthError::SessionExpiredOrNotFound)?;
        parts.extensions.insert(user.clone());
        Ok(Self(user))
    }
}
