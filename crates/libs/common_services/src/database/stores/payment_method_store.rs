use crate::database::DbError;
use crate::database::tables::payment_method::PaymentMethodType;
use sqlx::{Executor, Postgres};

pub struct PaymentMethodStore;

impl PaymentMethodStore {
    /// The fixed catalog, seeded by migration.
    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<PaymentMethodType>, DbError> {
        Ok(
            sqlx::query_as::<_, PaymentMethodType>(
                "SELECT * FROM payment_method_type ORDER BY id",
            )
            .fetch_all(executor)
            .await?,
        )
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        payment_method_id: i32,
    ) -> Result<Option<PaymentMethodType>, DbError> {
        Ok(
            sqlx::query_as::<_, PaymentMethodType>(
                "SELECT * FROM payment_method_type WHERE id = $1",
            )
            .bind(payment_method_id)
            .fetch_optional(executor)
            .await?,
        )
    }
}
