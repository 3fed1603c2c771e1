use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(sqlx::Error),

    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return Self::UniqueViolation(err);
        }
        Self::Sqlx(err)
    }
}
