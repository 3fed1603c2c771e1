//! HTTP handlers for customer reviews.

use crate::api_state::ApiContext;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use common_services::api::reviews::error::ReviewsError;
use common_services::api::reviews::interfaces::CreateReviewRequest;
use common_services::api::reviews::service::{create_review, list_machine_reviews};
use common_services::database::app_user::User;
use common_services::database::review::{Review, ReviewWithAuthor};
use tracing::instrument;

/// Submits a review. It stays hidden from public listings until an admin
/// approves it.
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review submitted, pending approval", body = Review),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Machine not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), err(Debug))]
pub async fn create_review_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<Json<Review>, ReviewsError> {
    let review = create_review(&context.pool, user.id, payload).await?;
    Ok(Json(review))
}

/// The approved reviews of one machine, newest first.
#[utoipa::path(
    get,
    path = "/machines/{machine_id}/reviews",
    tag = "Reviews",
    params(("machine_id" = i32, Path, description = "Machine id")),
    responses(
        (status = 200, description = "Approved reviews", body = Vec<ReviewWithAuthor>),
        (status = 404, description = "Machine not found"),
    )
)]
pub async fn list_machine_reviews_handler(
    State(context): State<ApiContext>,
    Path(machine_id): Path<i32>,
) -> Result<Json<Vec<ReviewWithAuthor>>, ReviewsError> {
    let reviews = list_machine_reviews(&context.pool, machine_id).await?;
    Ok(Json(reviews))
}
