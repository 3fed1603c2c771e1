use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Represents a user account. Accounts are deactivated rather than deleted.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Represents a user record from db, including the password hash.
#[derive(Debug, FromRow)]
pub struct UserWithPassword {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub password: String,
}

impl UserWithPassword {
    /// Drops the password hash, leaving the representation safe to serialize.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            email: self.email,
            name: self.name,
            role: self.role,
            is_active: self.is_active,
        }
    }
}

/// Maps to the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Owner,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Owner => write!(f, "OWNER"),
        }
    }
}
