use crate::admin::handlers::{
    approve_review_handler, deactivate_user_handler, delete_review_handler,
    list_pending_reviews_handler, list_users_handler,
};
use crate::api_state::ApiContext;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn admin_router() -> Router<ApiContext> {
    Router::new()
        .route("/admin/users", get(list_users_handler))
        .route(
            "/admin/users/{user_id}/deactivate",
            post(deactivate_user_handler),
        )
        .route("/admin/reviews", get(list_pending_reviews_handler))
        .route(
            "/admin/reviews/{review_id}/approve",
            post(approve_review_handler),
        )
        .route("/admin/reviews/{review_id}", delete(delete_review_handler))
}
