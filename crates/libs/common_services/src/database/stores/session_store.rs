use crate::database::DbError;
use crate::database::tables::session::{Session, SessionWithUser};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct SessionStore;

impl SessionStore {
    /// Inserts a new session row. A user may hold any number of concurrent
    /// sessions (one per device).
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, DbError> {
        Ok(sqlx::query_as::<_, Session>(
            "INSERT INTO session (user_id, token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, token, expires_at, created_at",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(executor)
        .await?)
    }

    /// Looks up a session by its token, joined with the owning user. Expiry is
    /// not checked here; the auth service decides what to do with stale rows.
    pub async fn find_by_token(
        executor: impl Executor<'_, Database = Postgres>,
        token: &str,
    ) -> Result<Option<SessionWithUser>, DbError> {
        Ok(sqlx::query_as::<_, SessionWithUser>(
            "SELECT
                 s.id, s.user_id, s.token, s.expires_at, s.created_at,
                 u.created_at AS user_created_at,
                 u.updated_at AS user_updated_at,
                 u.email, u.name, u.role, u.is_active
             FROM session s
             JOIN app_user u ON u.id = s.user_id
             WHERE s.token = $1",
        )
        .bind(token)
        .fetch_optional(executor)
        .await?)
    }

    /// Deletes a session by token. Idempotent; racing deletions are harmless.
    pub async fn delete_by_token(
        executor: impl Executor<'_, Database = Postgres>,
        token: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM session WHERE token = $1")
            .bind(token)
            .execute(executor)
            .await?)
    }

    /// Removes every expired session row. Called opportunistically; the
    /// per-token path in the auth service already purges rows it touches.
    pub async fn delete_expired(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM session WHERE expires_at <= now()")
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
