use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A customer review for one machine. Hidden from public listings until
/// approved by an admin.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub machine_id: i32,
    pub user_id: i32,
    pub rating: i16,
    pub comment: Option<String>,
    pub is_approved: bool,
}

/// A review joined with the author's display name for listings.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithAuthor {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub machine_id: i32,
    pub user_id: i32,
    pub author_name: String,
    pub rating: i16,
    pub comment: Option<String>,
    pub is_approved: bool,
}
