use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{extract_context, extract_token};
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::service::verify_session;
use common_services::database::app_user::User;

/// Extractor for routes that are public but show extra detail when a valid
/// session is presented. A missing, stale, or expired token reads as an
/// anonymous request rather than a rejection.
#[derive(Clone, Debug)]
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = match extract_token(&parts.headers) {
            Ok(token) => token,
            Err(AuthError::MissingToken) => {
                parts.extensions.insert(Self(None));
                return Ok(Self(None));
            }
            Err(e) => return Err(e),
        };

        let context = extract_context(parts, state).await?;
        let user = verify_session(&context.pool, &token)
            .await?
            .map(|(_session, user)| user);
        parts.extensions.insert(Self(user.clone()));
        Ok(Self(user))
    }
}
