use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub machine_id: i32,
    /// 1 to 5 stars.
    pub rating: i16,
    pub comment: Option<String>,
}
