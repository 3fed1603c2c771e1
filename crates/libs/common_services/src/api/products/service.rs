use crate::api::products::error::ProductsError;
use crate::api::products::interfaces::{CreateProductRequest, UpdateProductRequest};
use crate::database::product::Product;
use crate::database::product_store::ProductStore;
use sqlx::PgPool;
use tracing::{info, instrument};

fn validate_price(price_cents: i32) -> Result<(), ProductsError> {
    if price_cents < 0 {
        return Err(ProductsError::BadRequest(format!(
            "price must not be negative: {price_cents}"
        )));
    }
    Ok(())
}

#[instrument(skip(pool))]
pub async fn create_product(
    pool: &PgPool,
    payload: CreateProductRequest,
) -> Result<Product, ProductsError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ProductsError::BadRequest("name must not be empty".into()));
    }
    validate_price(payload.price_cents)?;

    let product = ProductStore::create(
        pool,
        name,
        payload.description,
        payload.price_cents,
        payload.is_available,
    )
    .await?;
    info!("Created product {} ({})", product.id, product.name);
    Ok(product)
}

#[instrument(skip(pool))]
pub async fn update_product(
    pool: &PgPool,
    product_id: i32,
    payload: UpdateProductRequest,
) -> Result<Product, ProductsError> {
    if let Some(price) = payload.price_cents {
        validate_price(price)?;
    }
    if payload.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(ProductsError::BadRequest("name must not be empty".into()));
    }

    ProductStore::update(
        pool,
        product_id,
        payload.name,
        payload.description,
        payload.price_cents,
        payload.is_available,
    )
    .await
    .map_err(|err| match err {
        crate::database::DbError::Sqlx(sqlx::Error::RowNotFound) => {
            ProductsError::NotFound(product_id)
        }
        other => other.into(),
    })
}

/// Deletes a product from the catalog. Refused with a conflict while any
/// machine join row still references it; the count is reported to the client.
#[instrument(skip(pool))]
pub async fn delete_product(pool: &PgPool, product_id: i32) -> Result<(), ProductsError> {
    let references = ProductStore::count_machine_references(pool, product_id).await?;
    if references > 0 {
        return Err(ProductsError::StillReferenced { references });
    }

    let result = ProductStore::delete(pool, product_id).await?;
    if result.rows_affected() == 0 {
        return Err(ProductsError::NotFound(product_id));
    }
    info!("Deleted product {}", product_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_prices_are_rejected() {
        assert!(validate_price(-1).is_err());
        assert!(validate_price(0).is_ok());
        assert!(validate_price(250).is_ok());
    }
}
