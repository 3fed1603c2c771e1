use crate::test_context::TestContext;
use crate::tests::{OWNER_EMAIL, login};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::products::interfaces::{CreateProductRequest, UpdateProductRequest};
use common_services::database::product::Product;
use common_services::database::product_store::ProductStore;

async fn find_product(context: &TestContext, name: &str) -> Result<Product> {
    ProductStore::list(&context.pool)
        .await?
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| eyre!("product {} not found", name))
}

pub async fn test_create_products(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, OWNER_EMAIL).await?;

    // ACT
    for (name, price_cents) in [("Cola", 150), ("Water", 100)] {
        let response = context
            .http_client
            .post(context.url("/products"))
            .bearer_auth(&session.token)
            .json(&CreateProductRequest {
                name: name.to_owned(),
                description: None,
                price_cents,
                is_available: true,
            })
            .send()
            .await?;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    // The catalog is public.
    let list_response = context.http_client.get(context.url("/products")).send().await?;
    let products: Vec<Product> = list_response.json().await?;

    // ASSERT
    assert_eq!(products.len(), 2);
    assert!(products.iter().any(|p| p.name == "Cola" && p.price_cents == 150));

    Ok(())
}

pub async fn test_duplicate_product_name_conflicts(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, OWNER_EMAIL).await?;

    // ACT
    let response = context
        .http_client
        .post(context.url("/products"))
        .bearer_auth(&session.token)
        .json(&CreateProductRequest {
            name: "Cola".to_owned(),
            description: Some("a second cola".to_owned()),
            price_cents: 199,
            is_available: true,
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::CONFLICT);
    assert_eq!(ProductStore::list(&context.pool).await?.len(), 2);

    Ok(())
}

pub async fn test_update_product(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, OWNER_EMAIL).await?;
    let water = find_product(context, "Water").await?;

    // ACT
    let response = context
        .http_client
        .put(context.url(&format!("/products/{}", water.id)))
        .bearer_auth(&session.token)
        .json(&UpdateProductRequest {
            name: None,
            description: Some("Still water, 0.5l".to_owned()),
            price_cents: Some(120),
            is_available: None,
        })
        .send()
        .await?;

    let status = response.status();
    let updated: Product = response.json().await?;

    // ASSERT
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(updated.price_cents, 120);
    assert_eq!(updated.name, "Water");

    Ok(())
}

pub async fn test_delete_unreferenced_product(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, OWNER_EMAIL).await?;
    let create_response = context
        .http_client
        .post(context.url("/products"))
        .bearer_auth(&session.token)
        .json(&CreateProductRequest {
            name: "Juice".to_owned(),
            description: None,
            price_cents: 250,
            is_available: true,
        })
        .send()
        .await?;
    let juice: Product = create_response.json().await?;

    // ACT
    let delete_response = context
        .http_client
        .delete(context.url(&format!("/products/{}", juice.id)))
        .bearer_auth(&session.token)
        .send()
        .await?;

    // ASSERT
    assert_eq!(delete_response.status(), reqwest::StatusCode::NO_CONTENT);
    assert!(ProductStore::find_by_id(&context.pool, juice.id).await?.is_none());

    Ok(())
}

/// Runs after the machine tests linked "Cola" to a machine.
pub async fn test_delete_referenced_product_conflicts(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, OWNER_EMAIL).await?;
    let cola = find_product(context, "Cola").await?;
    assert!(ProductStore::count_machine_references(&context.pool, cola.id).await? > 0);

    // ACT
    let response = context
        .http_client
        .delete(context.url(&format!("/products/{}", cola.id)))
        .bearer_auth(&session.token)
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::CONFLICT);
    assert!(ProductStore::find_by_id(&context.pool, cola.id).await?.is_some());

    Ok(())
}
