use crate::database::machine::VendingMachine;
use crate::database::payment_method::MachinePaymentMethod;
use crate::database::photo::Photo;
use crate::database::product::MachineProduct;
use crate::database::review::ReviewWithAuthor;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMachineRequest {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// All fields optional; omitted ones are left unchanged.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMachineRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: Option<bool>,
}

/// One entry of a machine's product list as submitted by the owner.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineProductEntry {
    pub product_id: i32,
    pub price_cents_override: Option<i32>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Replaces the machine's product set wholesale.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetProductsRequest {
    pub products: Vec<MachineProductEntry>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachinePaymentMethodEntry {
    pub payment_method_id: i32,
    pub is_available: bool,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetPaymentMethodsRequest {
    pub payment_methods: Vec<MachinePaymentMethodEntry>,
}

/// The public detail view: the machine plus everything hanging off it.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineDetailsResponse {
    #[serde(flatten)]
    pub machine: VendingMachine,
    pub products: Vec<MachineProduct>,
    pub payment_methods: Vec<MachinePaymentMethod>,
    pub photos: Vec<Photo>,
    pub reviews: Vec<ReviewWithAuthor>,
}

fn default_true() -> bool {
    true
}
