use crate::test_context::TestContext;
use crate::tests::{ADMIN_EMAIL, OTHER_EMAIL, login};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::machines::interfaces::MachineDetailsResponse;
use common_services::api::reviews::interfaces::CreateReviewRequest;
use common_services::database::machine::VendingMachine;
use common_services::database::machine_store::MachineStore;
use common_services::database::review::{Review, ReviewWithAuthor};

async fn the_machine(context: &TestContext) -> Result<VendingMachine> {
    MachineStore::list(&context.pool, false)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| eyre!("no machine in database"))
}

pub async fn test_review_moderation_flow(context: &TestContext) -> Result<()> {
    // ARRANGE
    let customer = login(context, OTHER_EMAIL).await?;
    let admin = login(context, ADMIN_EMAIL).await?;
    let machine = the_machine(context).await?;
    let reviews_url = context.url(&format!("/machines/{}/reviews", machine.id));

    // ACT 1: a customer submits a review.
    let create_response = context
        .http_client
        .post(context.url("/reviews"))
        .bearer_auth(&customer.token)
        .json(&CreateReviewRequest {
            machine_id: machine.id,
            rating: 5,
            comment: Some("Always stocked, fair prices.".to_owned()),
        })
        .send()
        .await?;
    let review: Review = create_response.json().await?;
    assert!(!review.is_approved);

    // The public listing stays empty until approval.
    let public_before: Vec<ReviewWithAuthor> = context
        .http_client
        .get(&reviews_url)
        .send()
        .await?
        .json()
        .await?;
    assert!(public_before.is_empty());

    // The machine owner sees the pending review in the detail view.
    let owner_session = login(context, crate::tests::OWNER_EMAIL).await?;
    let owner_details: MachineDetailsResponse = context
        .http_client
        .get(context.url(&format!("/machines/{}", machine.id)))
        .bearer_auth(&owner_session.token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(owner_details.reviews.len(), 1);

    // ACT 2: the admin approves it.
    let pending: Vec<ReviewWithAuthor> = context
        .http_client
        .get(context.url("/admin/reviews"))
        .bearer_auth(&admin.token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(pending.len(), 1);

    let approve_response = context
        .http_client
        .post(context.url(&format!("/admin/reviews/{}/approve", review.id)))
        .bearer_auth(&admin.token)
        .send()
        .await?;
    let approved: Review = approve_response.json().await?;

    // ASSERT
    assert!(approved.is_approved);
    let public_after: Vec<ReviewWithAuthor> = context
        .http_client
        .get(&reviews_url)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(public_after.len(), 1);
    assert_eq!(public_after[0].author_name, "Other");
    assert_eq!(public_after[0].rating, 5);

    // ACT 3: the admin removes it again.
    let delete_response = context
        .http_client
        .delete(context.url(&format!("/admin/reviews/{}", review.id)))
        .bearer_auth(&admin.token)
        .send()
        .await?;

    assert_eq!(delete_response.status(), reqwest::StatusCode::NO_CONTENT);
    let public_final: Vec<ReviewWithAuthor> = context
        .http_client
        .get(&reviews_url)
        .send()
        .await?
        .json()
        .await?;
    assert!(public_final.is_empty());

    Ok(())
}

pub async fn test_invalid_rating_is_rejected(context: &TestContext) -> Result<()> {
    // ARRANGE
    let customer = login(context, OTHER_EMAIL).await?;
    let machine = the_machine(context).await?;

    // ACT
    let response = context
        .http_client
        .post(context.url("/reviews"))
        .bearer_auth(&customer.token)
        .json(&CreateReviewRequest {
            machine_id: machine.id,
            rating: 6,
            comment: None,
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    Ok(())
}
