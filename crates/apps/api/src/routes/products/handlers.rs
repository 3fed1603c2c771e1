//! HTTP handlers for the shared product catalog.

use crate::api_state::ApiContext;
use axum::http::StatusCode;
use axum::{
    Json,
    extract::{Path, State},
};
use common_services::api::products::error::ProductsError;
use common_services::api::products::interfaces::{CreateProductRequest, UpdateProductRequest};
use common_services::api::products::service::{create_product, delete_product, update_product};
use common_services::database::product::Product;
use common_services::database::product_store::ProductStore;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "The product catalog", body = Vec<Product>),
    )
)]
pub async fn list_products_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<Product>>, ProductsError> {
    Ok(Json(ProductStore::list(&context.pool).await?))
}

#[utoipa::path(
    get,
    path = "/products/{product_id}",
    tag = "Products",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product data", body = Product),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn get_product_handler(
    State(context): State<ApiContext>,
    Path(product_id): Path<i32>,
) -> Result<Json<Product>, ProductsError> {
    let product = ProductStore::find_by_id(&context.pool, product_id)
        .await?
        .ok_or(ProductsError::NotFound(product_id))?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 409, description = "A product with this name already exists"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn create_product_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<Product>, ProductsError> {
    let product = create_product(&context.pool, payload).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/products/{product_id}",
    tag = "Products",
    params(("product_id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found"),
        (status = 409, description = "A product with this name already exists"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product_handler(
    State(context): State<ApiContext>,
    Path(product_id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ProductsError> {
    let product = update_product(&context.pool, product_id, payload).await?;
    Ok(Json(product))
}

/// Deletes a product. Refused with 409 while any machine still lists it.
#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = "Products",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product is still referenced by machines"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product_handler(
    State(context): State<ApiContext>,
    Path(product_id): Path<i32>,
) -> Result<StatusCode, ProductsError> {
    delete_product(&context.pool, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
