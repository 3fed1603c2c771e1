use crate::api_state::ApiContext;
use crate::machines::handlers::{
    create_machine_handler, delete_machine_handler, get_machine_handler, list_machines_handler,
    set_machine_payment_methods_handler, set_machine_products_handler, update_machine_handler,
};
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn machines_auth_optional_router() -> Router<ApiContext> {
    Router::new()
        .route("/machines", get(list_machines_handler))
        .route("/machines/{machine_id}", get(get_machine_handler))
}

pub fn machines_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/machines", post(create_machine_handler))
        .route(
            "/machines/{machine_id}",
            put(update_machine_handler).delete(delete_machine_handler),
        )
        .route(
            "/machines/{machine_id}/products",
            put(set_machine_products_handler),
        )
        .route(
            "/machines/{machine_id}/payment-methods",
            put(set_machine_payment_methods_handler),
        )
}
