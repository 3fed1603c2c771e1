//! Admin-only handlers: account moderation and review approval.

use crate::api_state::ApiContext;
use axum::http::StatusCode;
use axum::{
    Json,
    extract::{Path, State},
};
use common_services::api::auth::error::AuthError;
use common_services::api::reviews::error::ReviewsError;
use common_services::api::reviews::service::{
    approve_review, delete_review, list_pending_reviews,
};
use common_services::database::app_user::User;
use common_services::database::review::{Review, ReviewWithAuthor};
use common_services::database::user_store::UserStore;
use tracing::{info, instrument};

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "All user accounts", body = Vec<User>),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<User>>, AuthError> {
    let users = UserStore::list_users(&context.pool).await?;
    Ok(Json(users))
}

/// Deactivates an account. Existing sessions stop resolving immediately;
/// the account's machines and reviews stay in place.
#[utoipa::path(
    post,
    path = "/admin/users/{user_id}/deactivate",
    tag = "Admin",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "Account deactivated"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context), err(Debug))]
pub async fn deactivate_user_handler(
    State(context): State<ApiContext>,
    Path(user_id): Path<i32>,
) -> Result<StatusCode, AuthError> {
    let result = UserStore::deactivate(&context.pool, user_id).await?;
    if result.rows_affected() == 0 {
        return Err(AuthError::UserNotFound);
    }
    info!("Deactivated user {}", user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Reviews waiting for moderation, across all machines.
#[utoipa::path(
    get,
    path = "/admin/reviews",
    tag = "Admin",
    responses(
        (status = 200, description = "Pending reviews", body = Vec<ReviewWithAuthor>),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_pending_reviews_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<ReviewWithAuthor>>, ReviewsError> {
    let reviews = list_pending_reviews(&context.pool).await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    post,
    path = "/admin/reviews/{review_id}/approve",
    tag = "Admin",
    params(("review_id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review approved", body = Review),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Review not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn approve_review_handler(
    State(context): State<ApiContext>,
    Path(review_id): Path<i32>,
) -> Result<Json<Review>, ReviewsError> {
    let review = approve_review(&context.pool, review_id).await?;
    Ok(Json(review))
}

#[utoipa::path(
    delete,
    path = "/admin/reviews/{review_id}",
    tag = "Admin",
    params(("review_id" = i32, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Review not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_review_handler(
    State(context): State<ApiContext>,
    Path(review_id): Path<i32>,
) -> Result<StatusCode, ReviewsError> {
    delete_review(&context.pool, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
