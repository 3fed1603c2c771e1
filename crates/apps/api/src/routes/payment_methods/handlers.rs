use crate::api_state::ApiContext;
use axum::{Json, extract::State};
use color_eyre::eyre;
use common_services::database::payment_method::PaymentMethodType;
use common_services::database::payment_method_store::PaymentMethodStore;
use http::StatusCode;
use tracing::error;

/// The fixed payment method catalog (coin, banknote, girocard, credit card).
#[utoipa::path(
    get,
    path = "/payment-methods",
    tag = "Payment Methods",
    responses(
        (status = 200, description = "Payment method catalog", body = Vec<PaymentMethodType>),
    )
)]
pub async fn list_payment_methods_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<PaymentMethodType>>, StatusCode> {
    PaymentMethodStore::list(&context.pool)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Could not load payment methods: {:?}", eyre::Report::new(e));
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
