use crate::database::DbError;
use crate::database::tables::machine::VendingMachine;
use crate::database::tables::payment_method::MachinePaymentMethod;
use crate::database::tables::product::MachineProduct;
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct MachineStore;

impl MachineStore {
    //================================================================================
    // Core Machine Management
    //================================================================================

    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        owner_id: i32,
        name: &str,
        location: &str,
        description: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<VendingMachine, DbError> {
        Ok(sqlx::query_as::<_, VendingMachine>(
            "INSERT INTO vending_machine (owner_id, name, location, description, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(owner_id)
        .bind(name)
        .bind(location)
        .bind(description)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(executor)
        .await?)
    }

    /// Updates the details of a machine.
    ///
    /// Pass `None` for fields that should remain unchanged.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
        name: Option<String>,
        location: Option<String>,
        description: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        is_active: Option<bool>,
    ) -> Result<VendingMachine, DbError> {
        Ok(sqlx::query_as::<_, VendingMachine>(
            "UPDATE vending_machine
             SET
                 name = COALESCE($1, name),
                 location = COALESCE($2, location),
                 description = COALESCE($3, description),
                 latitude = COALESCE($4, latitude),
                 longitude = COALESCE($5, longitude),
                 is_active = COALESCE($6, is_active),
                 updated_at = now()
             WHERE id = $7
             RETURNING *",
        )
        .bind(name)
        .bind(location)
        .bind(description)
        .bind(latitude)
        .bind(longitude)
        .bind(is_active)
        .bind(machine_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn set_logo_url(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
        logo_url: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query(
            "UPDATE vending_machine SET logo_url = $1, updated_at = now() WHERE id = $2",
        )
        .bind(logo_url)
        .bind(machine_id)
        .execute(executor)
        .await?)
    }

    /// Deletes a machine. Join rows, photos, and reviews cascade.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM vending_machine WHERE id = $1")
            .bind(machine_id)
            .execute(executor)
            .await?)
    }

    //================================================================================
    // Find / Get Methods
    //================================================================================

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
    ) -> Result<Option<VendingMachine>, DbError> {
        Ok(
            sqlx::query_as::<_, VendingMachine>("SELECT * FROM vending_machine WHERE id = $1")
                .bind(machine_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Just the owner id, for the owner-or-admin gate.
    pub async fn get_owner_id(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
    ) -> Result<Option<i32>, DbError> {
        Ok(
            sqlx::query_scalar("SELECT owner_id FROM vending_machine WHERE id = $1")
                .bind(machine_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
        only_active: bool,
    ) -> Result<Vec<VendingMachine>, DbError> {
        let query = if only_active {
            "SELECT * FROM vending_machine WHERE is_active ORDER BY name"
        } else {
            "SELECT * FROM vending_machine ORDER BY name"
        };
        Ok(sqlx::query_as::<_, VendingMachine>(query)
            .fetch_all(executor)
            .await?)
    }

    pub async fn list_by_owner(
        executor: impl Executor<'_, Database = Postgres>,
        owner_id: i32,
    ) -> Result<Vec<VendingMachine>, DbError> {
        Ok(sqlx::query_as::<_, VendingMachine>(
            "SELECT * FROM vending_machine WHERE owner_id = $1 ORDER BY name",
        )
        .bind(owner_id)
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Join Rows (products, payment methods)
    //================================================================================

    pub async fn list_products(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
    ) -> Result<Vec<MachineProduct>, DbError> {
        Ok(sqlx::query_as::<_, MachineProduct>(
            "SELECT
                 p.id AS product_id,
                 p.name, p.description, p.photo_url, p.price_cents,
                 mp.price_cents_override, mp.is_available
             FROM machine_product mp
             JOIN product p ON p.id = mp.product_id
             WHERE mp.machine_id = $1
             ORDER BY p.name",
        )
        .bind(machine_id)
        .fetch_all(executor)
        .await?)
    }

    pub async fn clear_products(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM machine_product WHERE machine_id = $1")
            .bind(machine_id)
            .execute(executor)
            .await?)
    }

    pub async fn add_product(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
        product_id: i32,
        price_cents_override: Option<i32>,
        is_available: bool,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query(
            "INSERT INTO machine_product (machine_id, product_id, price_cents_override, is_available)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(machine_id)
        .bind(product_id)
        .bind(price_cents_override)
        .bind(is_available)
        .execute(executor)
        .await?)
    }

    /// Every catalog payment method, with this machine's availability flag
    /// (false when the machine has no join row yet).
    pub async fn list_payment_methods(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
    ) -> Result<Vec<MachinePaymentMethod>, DbError> {
        Ok(sqlx::query_as::<_, MachinePaymentMethod>(
            "SELECT
                 pmt.id AS payment_method_id,
                 pmt.code, pmt.display_name, pmt.icon,
                 COALESCE(mpm.is_available, FALSE) AS is_available
             FROM payment_method_type pmt
             LEFT JOIN machine_payment_method mpm
                 ON mpm.payment_method_id = pmt.id AND mpm.machine_id = $1
             ORDER BY pmt.id",
        )
        .bind(machine_id)
        .fetch_all(executor)
        .await?)
    }

    pub async fn clear_payment_methods(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM machine_payment_method WHERE machine_id = $1")
                .bind(machine_id)
                .execute(executor)
                .await?,
        )
    }

    pub async fn add_payment_method(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
        payment_method_id: i32,
        is_available: bool,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query(
            "INSERT INTO machine_payment_method (machine_id, payment_method_id, is_available)
             VALUES ($1, $2, $3)",
        )
        .bind(machine_id)
        .bind(payment_method_id)
        .bind(is_available)
        .execute(executor)
        .await?)
    }
}
