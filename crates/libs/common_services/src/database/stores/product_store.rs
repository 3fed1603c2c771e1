use crate::database::DbError;
use crate::database::tables::product::Product;
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct ProductStore;

impl ProductStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        name: &str,
        description: Option<String>,
        price_cents: i32,
        is_available: bool,
    ) -> Result<Product, DbError> {
        Ok(sqlx::query_as::<_, Product>(
            "INSERT INTO product (name, description, price_cents, is_available)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(price_cents)
        .bind(is_available)
        .fetch_one(executor)
        .await?)
    }

    /// Updates a product's details.
    ///
    /// Pass `None` for fields that should remain unchanged.
    pub async fn update(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
        name: Option<String>,
        description: Option<String>,
        price_cents: Option<i32>,
        is_available: Option<bool>,
    ) -> Result<Product, DbError> {
        Ok(sqlx::query_as::<_, Product>(
            "UPDATE product
             SET
                 name = COALESCE($1, name),
                 description = COALESCE($2, description),
                 price_cents = COALESCE($3, price_cents),
                 is_available = COALESCE($4, is_available),
                 updated_at = now()
             WHERE id = $5
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(price_cents)
        .bind(is_available)
        .bind(product_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn set_photo_url(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
        photo_url: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("UPDATE product SET photo_url = $1, updated_at = now() WHERE id = $2")
                .bind(photo_url)
                .bind(product_id)
                .execute(executor)
                .await?,
        )
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(product_id)
            .execute(executor)
            .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
    ) -> Result<Option<Product>, DbError> {
        Ok(
            sqlx::query_as::<_, Product>("SELECT * FROM product WHERE id = $1")
                .bind(product_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<Product>, DbError> {
        Ok(
            sqlx::query_as::<_, Product>("SELECT * FROM product ORDER BY name")
                .fetch_all(executor)
                .await?,
        )
    }

    /// How many machine join rows reference this product. Deletion is refused
    /// while this is non-zero.
    pub async fn count_machine_references(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM machine_product WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(executor)
                .await?,
        )
    }
}
