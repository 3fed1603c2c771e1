use crate::database::app_user::UserRole;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// An opaque bearer token row. Valid until `expires_at` or logout, whichever
/// comes first.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    #[serde(skip_serializing)]
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A session joined with the columns of its owning user that the auth
/// middleware needs.
#[derive(Debug, FromRow, Clone)]
pub struct SessionWithUser {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub user_created_at: DateTime<Utc>,
    pub user_updated_at: DateTime<Utc>,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl SessionWithUser {
    #[must_use]
    pub fn split(self) -> (Session, crate::database::app_user::User) {
        let session = Session {
            id: self.id,
            user_id: self.user_id,
            token: self.token,
            expires_at: self.expires_at,
            created_at: self.created_at,
        };
        let user = crate::database::app_user::User {
            id: self.user_id,
            created_at: self.user_created_at,
            updated_at: self.user_updated_at,
            email: self.email,
            name: self.name,
            role: self.role,
            is_active: self.is_active,
        };
        (session, user)
    }
}
