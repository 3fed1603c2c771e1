use crate::api::reviews::error::ReviewsError;
use crate::api::reviews::interfaces::CreateReviewRequest;
use crate::database::machine_store::MachineStore;
use crate::database::review_store::ReviewStore;
use crate::database::review::{Review, ReviewWithAuthor};
use sqlx::PgPool;
use tracing::{info, instrument};

fn validate_rating(rating: i16) -> Result<(), ReviewsError> {
    if !(1..=5).contains(&rating) {
        return Err(ReviewsError::BadRequest(format!(
            "rating must be between 1 and 5, got {rating}"
        )));
    }
    Ok(())
}

/// Submits a review for a machine. New reviews start unapproved and stay
/// hidden from the public listing until an admin approves them.
#[instrument(skip(pool))]
pub async fn create_review(
    pool: &PgPool,
    user_id: i32,
    payload: CreateReviewRequest,
) -> Result<Review, ReviewsError> {
    validate_rating(payload.rating)?;
    let comment = payload
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    if MachineStore::find_by_id(pool, payload.machine_id)
        .await?
        .is_none()
    {
        return Err(ReviewsError::MachineNotFound(payload.machine_id));
    }

    let review =
        ReviewStore::create(pool, payload.machine_id, user_id, payload.rating, comment).await?;
    info!(
        "User {} reviewed machine {} ({} stars)",
        user_id, payload.machine_id, payload.rating
    );
    Ok(review)
}

#[instrument(skip(pool))]
pub async fn approve_review(pool: &PgPool, review_id: i32) -> Result<Review, ReviewsError> {
    let review = ReviewStore::approve(pool, review_id)
        .await?
        .ok_or(ReviewsError::NotFound(review_id))?;
    info!("Approved review {}", review_id);
    Ok(review)
}

#[instrument(skip(pool))]
pub async fn delete_review(pool: &PgPool, review_id: i32) -> Result<(), ReviewsError> {
    let rows = ReviewStore::delete(pool, review_id).await?;
    if rows == 0 {
        return Err(ReviewsError::NotFound(review_id));
    }
    info!("Deleted review {}", review_id);
    Ok(())
}

/// Public listing: approved reviews only.
pub async fn list_machine_reviews(
    pool: &PgPool,
    machine_id: i32,
) -> Result<Vec<ReviewWithAuthor>, ReviewsError> {
    if MachineStore::find_by_id(pool, machine_id).await?.is_none() {
        return Err(ReviewsError::MachineNotFound(machine_id));
    }
    Ok(ReviewStore::list_by_machine(pool, machine_id, true).await?)
}

pub async fn list_pending_reviews(pool: &PgPool) -> Result<Vec<ReviewWithAuthor>, ReviewsError> {
    Ok(ReviewStore::list_pending(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-3).is_err());
    }
}
