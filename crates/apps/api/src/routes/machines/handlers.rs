//! HTTP handlers for vending machine management and the public listing.

use crate::api_state::ApiContext;
use crate::auth::middlewares::optional_user::OptionalUser;
use axum::http::StatusCode;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use common_services::api::machines::error::MachinesError;
use common_services::api::machines::interfaces::{
    CreateMachineRequest, MachineDetailsResponse, SetPaymentMethodsRequest, SetProductsRequest,
    UpdateMachineRequest,
};
use common_services::api::machines::service::{
    create_machine, delete_machine, get_machine_details, set_machine_payment_methods,
    set_machine_products, update_machine,
};
use common_services::database::app_user::User;
use common_services::database::machine::VendingMachine;
use common_services::database::machine_store::MachineStore;
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

#[derive(Deserialize, Debug, IntoParams)]
pub struct ListMachinesParams {
    /// When true and authenticated, list the caller's own machines, inactive
    /// ones included.
    #[serde(default)]
    pub mine: bool,
}

/// Lists machines. The public view only contains active machines.
#[utoipa::path(
    get,
    path = "/machines",
    tag = "Machines",
    params(ListMachinesParams),
    responses(
        (status = 200, description = "Machine list", body = Vec<VendingMachine>),
    )
)]
pub async fn list_machines_handler(
    State(context): State<ApiContext>,
    Extension(OptionalUser(user)): Extension<OptionalUser>,
    Query(params): Query<ListMachinesParams>,
) -> Result<Json<Vec<VendingMachine>>, MachinesError> {
    let machines = match (params.mine, user) {
        (true, Some(user)) => MachineStore::list_by_owner(&context.pool, user.id).await?,
        _ => MachineStore::list(&context.pool, true).await?,
    };
    Ok(Json(machines))
}

/// The full detail view of one machine: products, payment methods, gallery,
/// and approved reviews. The owner and admins also see unapproved reviews.
#[utoipa::path(
    get,
    path = "/machines/{machine_id}",
    tag = "Machines",
    params(("machine_id" = i32, Path, description = "Machine id")),
    responses(
        (status = 200, description = "Machine details", body = MachineDetailsResponse),
        (status = 404, description = "Machine not found"),
    )
)]
pub async fn get_machine_handler(
    State(context): State<ApiContext>,
    Extension(OptionalUser(user)): Extension<OptionalUser>,
    Path(machine_id): Path<i32>,
) -> Result<Json<MachineDetailsResponse>, MachinesError> {
    let details = get_machine_details(&context.pool, machine_id, user.as_ref()).await?;
    Ok(Json(details))
}

#[utoipa::path(
    post,
    path = "/machines",
    tag = "Machines",
    request_body = CreateMachineRequest,
    responses(
        (status = 200, description = "Machine created", body = VendingMachine),
        (status = 400, description = "Invalid machine data"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), err(Debug))]
pub async fn create_machine_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateMachineRequest>,
) -> Result<Json<VendingMachine>, MachinesError> {
    let machine = create_machine(&context.pool, user.id, payload).await?;
    Ok(Json(machine))
}

#[utoipa::path(
    put,
    path = "/machines/{machine_id}",
    tag = "Machines",
    params(("machine_id" = i32, Path, description = "Machine id")),
    request_body = UpdateMachineRequest,
    responses(
        (status = 200, description = "Machine updated", body = VendingMachine),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Machine not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_machine_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(machine_id): Path<i32>,
    Json(payload): Json<UpdateMachineRequest>,
) -> Result<Json<VendingMachine>, MachinesError> {
    let machine = update_machine(&context.pool, &user, machine_id, payload).await?;
    Ok(Json(machine))
}

#[utoipa::path(
    delete,
    path = "/machines/{machine_id}",
    tag = "Machines",
    params(("machine_id" = i32, Path, description = "Machine id")),
    responses(
        (status = 204, description = "Machine deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Machine not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_machine_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(machine_id): Path<i32>,
) -> Result<StatusCode, MachinesError> {
    delete_machine(
        &context.pool,
        &context.settings.uploads,
        &user,
        machine_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replaces the machine's product list wholesale.
#[utoipa::path(
    put,
    path = "/machines/{machine_id}/products",
    tag = "Machines",
    params(("machine_id" = i32, Path, description = "Machine id")),
    request_body = SetProductsRequest,
    responses(
        (status = 204, description = "Product list replaced"),
        (status = 400, description = "Unknown product id or invalid override"),
        (status = 403, description = "Not the owner"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_machine_products_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(machine_id): Path<i32>,
    Json(payload): Json<SetProductsRequest>,
) -> Result<StatusCode, MachinesError> {
    set_machine_products(&context.pool, &user, machine_id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replaces the machine's payment method list wholesale.
#[utoipa::path(
    put,
    path = "/machines/{machine_id}/payment-methods",
    tag = "Machines",
    params(("machine_id" = i32, Path, description = "Machine id")),
    request_body = SetPaymentMethodsRequest,
    responses(
        (status = 204, description = "Payment method list replaced"),
        (status = 400, description = "Unknown payment method id"),
        (status = 403, description = "Not the owner"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_machine_payment_methods_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(machine_id): Path<i32>,
    Json(payload): Json<SetPaymentMethodsRequest>,
) -> Result<StatusCode, MachinesError> {
    set_machine_payment_methods(&context.pool, &user, machine_id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
