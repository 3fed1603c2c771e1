use crate::database::DbError;
use crate::database::tables::photo::{MediaType, Photo};
use sqlx::{Executor, Postgres};

pub struct PhotoStore;

impl PhotoStore {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
        url: &str,
        caption: Option<String>,
        media_type: MediaType,
        original_filename: &str,
        size_bytes: i64,
    ) -> Result<Photo, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            "INSERT INTO photo (machine_id, url, caption, media_type, original_filename, size_bytes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(machine_id)
        .bind(url)
        .bind(caption)
        .bind(media_type)
        .bind(original_filename)
        .bind(size_bytes)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<Option<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>("SELECT * FROM photo WHERE id = $1")
            .bind(photo_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn list_by_machine(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
    ) -> Result<Vec<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            "SELECT * FROM photo WHERE machine_id = $1 ORDER BY created_at",
        )
        .bind(machine_id)
        .fetch_all(executor)
        .await?)
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM photo WHERE id = $1")
            .bind(photo_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
