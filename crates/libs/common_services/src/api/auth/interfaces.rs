use crate::database::app_user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Represents the data required to create a new user.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
}

/// Represents the data required for user login.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub email: String,
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
}

/// Returned on login: the bearer token plus the user it belongs to. The same
/// token is also set as the `session` cookie.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}
