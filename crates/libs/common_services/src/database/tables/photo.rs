use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Gallery media belonging to one machine. Rows cascade when the machine is
/// deleted; the file itself is removed best-effort by the upload service.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub machine_id: i32,
    pub url: String,
    pub caption: Option<String>,
    pub media_type: MediaType,
    pub original_filename: String,
    pub size_bytes: i64,
}

/// Maps to the `media_type` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "media_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}
