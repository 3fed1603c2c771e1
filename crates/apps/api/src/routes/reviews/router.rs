use crate::api_state::ApiContext;
use crate::reviews::handlers::{create_review_handler, list_machine_reviews_handler};
use axum::{
    Router,
    routing::{get, post},
};

pub fn reviews_public_router() -> Router<ApiContext> {
    Router::new().route(
        "/machines/{machine_id}/reviews",
        get(list_machine_reviews_handler),
    )
}

pub fn reviews_protected_router() -> Router<ApiContext> {
    Router::new().route("/reviews", post(create_review_handler))
}
