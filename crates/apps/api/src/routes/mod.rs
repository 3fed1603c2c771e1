pub mod admin;
mod api_doc;
pub mod auth;
pub mod machines;
pub mod payment_methods;
pub mod products;
pub mod reviews;
pub mod root;
pub mod uploads;

use crate::admin::router::admin_router;
use crate::api_state::ApiContext;
use crate::auth::middlewares::optional_user::OptionalUser;
use crate::auth::middlewares::require_role::require_role;
use crate::auth::middlewares::user::ApiUser;
use crate::auth::router::{auth_protected_router, auth_public_router};
use crate::machines::router::{machines_auth_optional_router, machines_protected_router};
use crate::payment_methods::router::payment_methods_public_router;
use crate::products::router::{products_protected_router, products_public_router};
use crate::reviews::router::{reviews_protected_router, reviews_public_router};
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use crate::uploads::router::uploads_protected_router;
use app_state::RateLimitingSettings;
use axum::Router;
use axum::middleware::{from_extractor_with_state, from_fn_with_state};
use common_services::database::app_user::UserRole;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(public_routes(&api_state.settings.api.rate_limiting))
        .merge(auth_optional_routes(api_state.clone()))
        .merge(protected_routes(api_state.clone()))
        .merge(admin_routes(api_state.clone()))
        .with_state(api_state)
}

fn public_routes(rate_limiting: &RateLimitingSettings) -> Router<ApiContext> {
    Router::new()
        .merge(auth_public_router(rate_limiting))
        .merge(root_public_router())
        .merge(products_public_router())
        .merge(payment_methods_public_router())
        .merge(reviews_public_router())
}

/// Routes that are public but render extra detail for authenticated callers.
fn auth_optional_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(machines_auth_optional_router())
        .route_layer(from_extractor_with_state::<OptionalUser, ApiContext>(
            api_state,
        ))
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(auth_protected_router())
        .merge(machines_protected_router())
        .merge(products_protected_router())
        .merge(reviews_protected_router())
        .merge(uploads_protected_router(&api_state.settings.uploads))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}

fn admin_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(admin_router())
        .route_layer(from_fn_with_state(UserRole::Admin, require_role))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
