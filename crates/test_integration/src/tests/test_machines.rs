use crate::test_context::TestContext;
use crate::tests::{OTHER_EMAIL, OWNER_EMAIL, PASSWORD, login};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::auth::interfaces::CreateUser;
use common_services::api::machines::interfaces::{
    CreateMachineRequest, MachineDetailsResponse, MachinePaymentMethodEntry, MachineProductEntry,
    SetPaymentMethodsRequest, SetProductsRequest, UpdateMachineRequest,
};
use common_services::database::machine::VendingMachine;
use common_services::database::machine_store::MachineStore;
use common_services::database::product_store::ProductStore;

async fn the_machine(context: &TestContext) -> Result<VendingMachine> {
    MachineStore::list(&context.pool, false)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| eyre!("no machine in database"))
}

pub async fn test_create_machine(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, OWNER_EMAIL).await?;

    // ACT
    let response = context
        .http_client
        .post(context.url("/machines"))
        .bearer_auth(&session.token)
        .json(&CreateMachineRequest {
            name: "Campus Snacks".to_owned(),
            location: "Main hall, building A".to_owned(),
            description: Some("Snacks and cold drinks".to_owned()),
            latitude: Some(51.0504),
            longitude: Some(13.7373),
        })
        .send()
        .await?;

    let status = response.status();
    let machine: VendingMachine = response.json().await?;

    // ASSERT
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(machine.owner_id, session.user.id);
    assert!(machine.is_active);

    Ok(())
}

pub async fn test_invalid_coordinates_are_rejected(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, OWNER_EMAIL).await?;

    // ACT
    let response = context
        .http_client
        .post(context.url("/machines"))
        .bearer_auth(&session.token)
        .json(&CreateMachineRequest {
            name: "Broken".to_owned(),
            location: "Nowhere".to_owned(),
            description: None,
            latitude: Some(123.0),
            longitude: None,
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    Ok(())
}

pub async fn test_public_listing_and_details(context: &TestContext) -> Result<()> {
    // ARRANGE
    let machine = the_machine(context).await?;

    // ACT (no authentication on purpose)
    let list_response = context.http_client.get(context.url("/machines")).send().await?;
    let machines: Vec<VendingMachine> = list_response.json().await?;

    let details_response = context
        .http_client
        .get(context.url(&format!("/machines/{}", machine.id)))
        .send()
        .await?;
    let details: MachineDetailsResponse = details_response.json().await?;

    let missing_response = context
        .http_client
        .get(context.url("/machines/999999"))
        .send()
        .await?;

    // ASSERT
    assert_eq!(machines.len(), 1);
    assert_eq!(details.machine.name, "Campus Snacks");
    assert!(details.products.is_empty());
    // The full payment method catalog is reported, all unavailable initially.
    assert_eq!(details.payment_methods.len(), 4);
    assert!(details.payment_methods.iter().all(|m| !m.is_available));
    assert_eq!(missing_response.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

pub async fn test_set_products(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, OWNER_EMAIL).await?;
    let machine = the_machine(context).await?;
    let products = ProductStore::list(&context.pool).await?;
    let cola = products
        .iter()
        .find(|p| p.name == "Cola")
        .ok_or_else(|| eyre!("Cola missing"))?;
    let water = products
        .iter()
        .find(|p| p.name == "Water")
        .ok_or_else(|| eyre!("Water missing"))?;

    // ACT
    let response = context
        .http_client
        .put(context.url(&format!("/machines/{}/products", machine.id)))
        .bearer_auth(&session.token)
        .json(&SetProductsRequest {
            products: vec![
                MachineProductEntry {
                    product_id: cola.id,
                    price_cents_override: Some(200),
                    is_available: true,
                },
                MachineProductEntry {
                    product_id: water.id,
                    price_cents_override: None,
                    is_available: true,
                },
            ],
        })
        .send()
        .await?;

    let unknown_response = context
        .http_client
        .put(context.url(&format!("/machines/{}/products", machine.id)))
        .bearer_auth(&session.token)
        .json(&SetProductsRequest {
            products: vec![MachineProductEntry {
                product_id: 999_999,
                price_cents_override: None,
                is_available: true,
            }],
        })
        .send()
        .await?;

    let details: MachineDetailsResponse = context
        .http_client
        .get(context.url(&format!("/machines/{}", machine.id)))
        .send()
        .await?
        .json()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);
    assert_eq!(unknown_response.status(), reqwest::StatusCode::BAD_REQUEST);
    // The failed update must not have wiped the previous list.
    assert_eq!(details.products.len(), 2);
    let listed_cola = details
        .products
        .iter()
        .find(|p| p.product_id == cola.id)
        .ok_or_else(|| eyre!("Cola not listed"))?;
    assert_eq!(listed_cola.effective_price_cents(), 200);

    Ok(())
}

pub async fn test_set_payment_methods(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, OWNER_EMAIL).await?;
    let machine = the_machine(context).await?;
    let details: MachineDetailsResponse = context
        .http_client
        .get(context.url(&format!("/machines/{}", machine.id)))
        .send()
        .await?
        .json()
        .await?;
    let coin = details
        .payment_methods
        .iter()
        .find(|m| m.code == "coin")
        .ok_or_else(|| eyre!("coin method missing"))?;

    // ACT
    let response = context
        .http_client
        .put(context.url(&format!("/machines/{}/payment-methods", machine.id)))
        .bearer_auth(&session.token)
        .json(&SetPaymentMethodsRequest {
            payment_methods: vec![MachinePaymentMethodEntry {
                payment_method_id: coin.payment_method_id,
                is_available: true,
            }],
        })
        .send()
        .await?;

    let updated: MachineDetailsResponse = context
        .http_client
        .get(context.url(&format!("/machines/{}", machine.id)))
        .send()
        .await?
        .json()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);
    let coin_after = updated
        .payment_methods
        .iter()
        .find(|m| m.code == "coin")
        .ok_or_else(|| eyre!("coin method missing"))?;
    assert!(coin_after.is_available);
    assert!(
        updated
            .payment_methods
            .iter()
            .filter(|m| m.code != "coin")
            .all(|m| !m.is_available)
    );

    Ok(())
}

pub async fn test_update_forbidden_for_other_user(context: &TestContext) -> Result<()> {
    // ARRANGE
    let register_response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            name: "Other".to_owned(),
            email: OTHER_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    assert_eq!(register_response.status(), reqwest::StatusCode::OK);

    let other_session = login(context, OTHER_EMAIL).await?;
    let machine = the_machine(context).await?;
    let payload = UpdateMachineRequest {
        name: Some("Hijacked".to_owned()),
        location: None,
        description: None,
        latitude: None,
        longitude: None,
        is_active: None,
    };

    // ACT
    let forbidden_response = context
        .http_client
        .put(context.url(&format!("/machines/{}", machine.id)))
        .bearer_auth(&other_session.token)
        .json(&payload)
        .send()
        .await?;

    let anonymous_response = context
        .http_client
        .put(context.url(&format!("/machines/{}", machine.id)))
        .json(&payload)
        .send()
        .await?;

    // ASSERT
    assert_eq!(forbidden_response.status(), reqwest::StatusCode::FORBIDDEN);
    assert_eq!(
        anonymous_response.status(),
        reqwest::StatusCode::UNAUTHORIZED
    );
    assert_eq!(the_machine(context).await?.name, "Campus Snacks");

    Ok(())
}
