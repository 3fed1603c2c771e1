use crate::database::DbError;
use crate::database::tables::app_user::{User, UserRole, UserWithPassword};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

const USER_COLUMNS: &str = "id, created_at, updated_at, email, name, role, is_active";

pub struct UserStore;

impl UserStore {
    //================================================================================
    // Core User Management (CRUD)
    //================================================================================

    /// Creates a new user. The email must already be lower-cased by the caller.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
        name: &str,
        hashed_password: &str,
        role: UserRole,
    ) -> Result<User, DbError> {
        let query = format!(
            "INSERT INTO app_user (email, name, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(name)
            .bind(hashed_password)
            .bind(role)
            .fetch_one(executor)
            .await?)
    }

    /// Marks a user inactive. Accounts are never deleted, so reviews and
    /// machines keep a valid author reference.
    pub async fn deactivate(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("UPDATE app_user SET is_active = FALSE, updated_at = now() WHERE id = $1")
                .bind(user_id)
                .execute(executor)
                .await?,
        )
    }

    //================================================================================
    // Find / Get Methods
    //================================================================================

    pub async fn find_by_email_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        let query = format!("SELECT {USER_COLUMNS}, password FROM app_user WHERE email = $1");
        Ok(sqlx::query_as::<_, UserWithPassword>(&query)
            .bind(email)
            .fetch_optional(executor)
            .await?)
    }

    //================================================================================
    // Utilities
    //================================================================================

    pub async fn count(executor: impl Executor<'_, Database = Postgres>) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM app_user")
            .fetch_one(executor)
            .await?)
    }

    pub async fn list_users(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<User>, DbError> {
        let query = format!("SELECT {USER_COLUMNS} FROM app_user ORDER BY id");
        Ok(sqlx::query_as::<_, User>(&query)
            .fetch_all(executor)
            .await?)
    }
}
