use crate::api_state::ApiContext;
use crate::payment_methods::handlers::list_payment_methods_handler;
use axum::{Router, routing::get};

pub fn payment_methods_public_router() -> Router<ApiContext> {
    Router::new().route("/payment-methods", get(list_payment_methods_handler))
}
