use crate::api_state::ApiContext;
use crate::products::handlers::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    update_product_handler,
};
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn products_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/products", get(list_products_handler))
        .route("/products/{product_id}", get(get_product_handler))
}

pub fn products_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/products", post(create_product_handler))
        .route(
            "/products/{product_id}",
            put(update_product_handler).delete(delete_product_handler),
        )
}
