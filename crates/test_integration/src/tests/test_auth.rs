use crate::test_context::TestContext;
use crate::tests::{ADMIN_EMAIL, OWNER_EMAIL, PASSWORD, login};
use chrono::Utc;
use color_eyre::Result;
use common_services::api::auth::interfaces::{CreateUser, LoginResponse, LoginUser};
use common_services::database::app_user::{User, UserRole};
use common_services::database::user_store::UserStore;

pub async fn test_first_registration_becomes_admin(context: &TestContext) -> Result<()> {
    // ACT
    // Mixed-case email on purpose; it must come back normalized.
    let response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            name: "Admin".to_owned(),
            email: "Admin@Example.com".to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;

    let status = response.status();
    let user: User = response.json().await?;

    // ASSERT
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(user.email, ADMIN_EMAIL);
    assert_eq!(user.role, UserRole::Admin);
    assert!(user.is_active);

    let all_users = UserStore::list_users(&context.pool).await?;
    assert_eq!(all_users.len(), 1);

    Ok(())
}

pub async fn test_duplicate_email_is_rejected(context: &TestContext) -> Result<()> {
    // ACT
    let response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            name: "Admin Again".to_owned(),
            email: ADMIN_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::CONFLICT);
    assert_eq!(UserStore::count(&context.pool).await?, 1);

    Ok(())
}

pub async fn test_second_registration_becomes_owner(context: &TestContext) -> Result<()> {
    // ACT
    let response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            name: "Owner".to_owned(),
            email: OWNER_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;

    let status = response.status();
    let user: User = response.json().await?;

    // ASSERT
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(user.role, UserRole::Owner);

    Ok(())
}

pub async fn test_login_and_me(context: &TestContext) -> Result<()> {
    // ACT
    let session = login(context, ADMIN_EMAIL).await?;

    let me_response = context
        .http_client
        .get(context.url("/auth/me"))
        .bearer_auth(&session.token)
        .send()
        .await?;
    let me_status = me_response.status();
    let user: User = me_response.json().await?;

    // ASSERT
    // 32 random bytes, base64url without padding.
    assert_eq!(session.token.len(), 43);
    let remaining_hours = (session.expires_at - Utc::now()).num_minutes() as f64 / 60.0;
    assert!((23.9..=24.1).contains(&remaining_hours));

    assert_eq!(me_status, reqwest::StatusCode::OK);
    assert_eq!(user.email, ADMIN_EMAIL);
    assert_eq!(user.role, UserRole::Admin);

    Ok(())
}

pub async fn test_session_cookie_is_accepted(context: &TestContext) -> Result<()> {
    // ARRANGE
    let login_response = context
        .http_client
        .post(context.url("/auth/login"))
        .json(&LoginUser {
            email: ADMIN_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    let set_cookie = login_response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
        .unwrap_or_default();
    let session: LoginResponse = login_response.json().await?;

    // ACT
    // The cookie is marked Secure, so reqwest's jar would drop it over plain
    // http. Send it by hand instead.
    let me_response = context
        .http_client
        .get(context.url("/auth/me"))
        .header(reqwest::header::COOKIE, format!("session={}", session.token))
        .send()
        .await?;

    // ASSERT
    assert!(set_cookie.starts_with(&format!("session={}", session.token)));
    assert!(set_cookie.contains("HttpOnly"));
    // The cookie lifetime matches the 24h session lifetime.
    assert!(set_cookie.contains("Max-Age=86400"));
    assert_eq!(me_response.status(), reqwest::StatusCode::OK);

    Ok(())
}

pub async fn test_wrong_password_is_rejected(context: &TestContext) -> Result<()> {
    // ACT
    let response = context
        .http_client
        .post(context.url("/auth/login"))
        .json(&LoginUser {
            email: ADMIN_EMAIL.to_owned(),
            password: "not the password".to_owned(),
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}

pub async fn test_expired_session_is_purged(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, ADMIN_EMAIL).await?;
    sqlx::query("UPDATE session SET expires_at = now() - interval '1 hour' WHERE token = $1")
        .bind(&session.token)
        .execute(&context.pool)
        .await?;

    // ACT
    let me_response = context
        .http_client
        .get(context.url("/auth/me"))
        .bearer_auth(&session.token)
        .send()
        .await?;

    // ASSERT
    assert_eq!(me_response.status(), reqwest::StatusCode::UNAUTHORIZED);
    // The stale row is deleted on the failed lookup, not just ignored.
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM session WHERE token = $1")
        .bind(&session.token)
        .fetch_one(&context.pool)
        .await?;
    assert_eq!(remaining, 0);

    Ok(())
}

pub async fn test_logout_invalidates_session(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = login(context, ADMIN_EMAIL).await?;

    // ACT
    let logout_response = context
        .http_client
        .post(context.url("/auth/logout"))
        .bearer_auth(&session.token)
        .send()
        .await?;

    let me_response = context
        .http_client
        .get(context.url("/auth/me"))
        .bearer_auth(&session.token)
        .send()
        .await?;

    // Logging out again with the same dead token still reads as success.
    let second_logout = context
        .http_client
        .post(context.url("/auth/logout"))
        .bearer_auth(&session.token)
        .send()
        .await?;

    // ASSERT
    assert_eq!(logout_response.status(), reqwest::StatusCode::NO_CONTENT);
    assert_eq!(me_response.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(second_logout.status(), reqwest::StatusCode::NO_CONTENT);

    Ok(())
}
