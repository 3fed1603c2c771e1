use crate::database::DbError;
use crate::database::tables::review::{Review, ReviewWithAuthor};
use sqlx::{Executor, Postgres};

const REVIEW_WITH_AUTHOR: &str = "SELECT
     r.id, r.created_at, r.machine_id, r.user_id,
     u.name AS author_name,
     r.rating, r.comment, r.is_approved
 FROM review r
 JOIN app_user u ON u.id = r.user_id";

pub struct ReviewStore;

impl ReviewStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
        user_id: i32,
        rating: i16,
        comment: Option<String>,
    ) -> Result<Review, DbError> {
        Ok(sqlx::query_as::<_, Review>(
            "INSERT INTO review (machine_id, user_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(machine_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(executor)
        .await?)
    }

    pub async fn approve(
        executor: impl Executor<'_, Database = Postgres>,
        review_id: i32,
    ) -> Result<Option<Review>, DbError> {
        Ok(sqlx::query_as::<_, Review>(
            "UPDATE review SET is_approved = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(review_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        review_id: i32,
    ) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM review WHERE id = $1")
            .bind(review_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_by_machine(
        executor: impl Executor<'_, Database = Postgres>,
        machine_id: i32,
        approved_only: bool,
    ) -> Result<Vec<ReviewWithAuthor>, DbError> {
        let query = if approved_only {
            format!("{REVIEW_WITH_AUTHOR} WHERE r.machine_id = $1 AND r.is_approved ORDER BY r.created_at DESC")
        } else {
            format!("{REVIEW_WITH_AUTHOR} WHERE r.machine_id = $1 ORDER BY r.created_at DESC")
        };
        Ok(sqlx::query_as::<_, ReviewWithAuthor>(&query)
            .bind(machine_id)
            .fetch_all(executor)
            .await?)
    }

    /// Reviews still waiting for moderation, across all machines.
    pub async fn list_pending(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<ReviewWithAuthor>, DbError> {
        let query = format!("{REVIEW_WITH_AUTHOR} WHERE NOT r.is_approved ORDER BY r.created_at");
        Ok(sqlx::query_as::<_, ReviewWithAuthor>(&query)
            .fetch_all(executor)
            .await?)
    }
}
