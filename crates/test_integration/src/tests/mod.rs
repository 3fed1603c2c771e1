use crate::test_context::TestContext;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::auth::interfaces::{LoginResponse, LoginUser};
use tracing::info;

mod test_auth;
mod test_machines;
mod test_products;
mod test_reviews;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const OWNER_EMAIL: &str = "owner@example.com";
pub const OTHER_EMAIL: &str = "other@example.com";
pub const PASSWORD: &str = "correct horse battery staple";

pub async fn run_all(ctx: &TestContext) -> Result<()> {
    macro_rules! run {
        ($test:path) => {
            info!("--- Running Test: {} ---", stringify!($test));
            $test(ctx).await?;
            info!("--- Test Passed: {} ---", stringify!($test));
        };
    }

    run!(test_root::test_root_and_health);

    run!(test_auth::test_first_registration_becomes_admin);
    run!(test_auth::test_duplicate_email_is_rejected);
    run!(test_auth::test_second_registration_becomes_owner);
    run!(test_auth::test_login_and_me);
    run!(test_auth::test_session_cookie_is_accepted);
    run!(test_auth::test_wrong_password_is_rejected);
    run!(test_auth::test_expired_session_is_purged);
    run!(test_auth::test_logout_invalidates_session);

    run!(test_products::test_create_products);
    run!(test_products::test_duplicate_product_name_conflicts);
    run!(test_products::test_update_product);
    run!(test_products::test_delete_unreferenced_product);

    run!(test_machines::test_create_machine);
    run!(test_machines::test_invalid_coordinates_are_rejected);
    run!(test_machines::test_public_listing_and_details);
    run!(test_machines::test_set_products);
    run!(test_machines::test_set_payment_methods);
    run!(test_machines::test_update_forbidden_for_other_user);

    run!(test_products::test_delete_referenced_product_conflicts);

    run!(test_uploads::test_upload_logo);
    run!(test_uploads::test_upload_gallery_photo_and_delete);
    run!(test_uploads::test_upload_product_photo);
    run!(test_uploads::test_upload_rejects_unsupported_extension);
    run!(test_uploads::test_upload_forbidden_for_non_owner);

    run!(test_reviews::test_review_moderation_flow);
    run!(test_reviews::test_invalid_rating_is_rejected);

    run!(test_admin::test_admin_routes_require_admin_role);
    run!(test_admin::test_deactivate_user);

    Ok(())
}

/// Logs in with the shared test password and returns the session.
pub async fn login(ctx: &TestContext, email: &str) -> Result<LoginResponse> {
    let response = ctx
        .http_client
        .post(ctx.url("/auth/login"))
        .json(&LoginUser {
            email: email.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    if response.status() != reqwest::StatusCode::OK {
        return Err(eyre!("login as {} failed: {}", email, response.status()));
    }
    Ok(response.json().await?)
}
