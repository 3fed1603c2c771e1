use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One entry of the fixed payment method catalog (coin, banknote, girocard,
/// credit card). Seeded by migration, never created through the API.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodType {
    pub id: i32,
    pub code: String,
    pub display_name: String,
    pub icon: String,
}

/// A catalog entry joined with one machine's availability flag.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachinePaymentMethod {
    pub payment_method_id: i32,
    pub code: String,
    pub display_name: String,
    pub icon: String,
    pub is_available: bool,
}
