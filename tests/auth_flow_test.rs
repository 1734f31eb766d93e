//! Session and role-gate behavior over the full router.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{response_json, TestApp};
use saree_api::entities::{user, UserRole};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde_json::json;

#[tokio::test]
async fn register_sets_session_cookie_and_hides_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/user/register",
            Some(json!({
                "email": "shopper@example.com",
                "password": "secret123",
                "name": "First Shopper"
            })),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));

    let body = response_json(response).await;
    assert_eq!(body["user"]["email"], "shopper@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::new().await;
    let payload = json!({
        "email": "twice@example.com",
        "password": "secret123",
        "name": "Twice Registered"
    });

    let first = app
        .request(Method::POST, "/api/auth/user/register", Some(payload.clone()), None)
        .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .request(Method::POST, "/api/auth/user/register", Some(payload), None)
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_rejects_bad_password_and_wrong_role_portal() {
    let app = TestApp::new().await;
    let (user, _) = app.seed_user(UserRole::User, None).await;

    let bad_password = app
        .request(
            Method::POST,
            "/api/auth/user/login",
            Some(json!({ "email": user.email, "password": "not-the-password" })),
            None,
        )
        .await;
    assert_eq!(bad_password.status(), StatusCode::UNAUTHORIZED);

    // A shopper account cannot enter through the admin portal.
    let wrong_portal = app
        .request(
            Method::POST,
            "/api/auth/admin/login",
            Some(json!({ "email": user.email, "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(wrong_portal.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn disabled_account_cannot_login() {
    let app = TestApp::new().await;
    let (seeded, _) = app.seed_user(UserRole::User, None).await;

    let mut active: user::ActiveModel = seeded.clone().into();
    active.is_active = Set(false);
    active.update(&*app.state.db).await.expect("disable account");

    let response = app
        .request(
            Method::POST,
            "/api/auth/user/login",
            Some(json!({ "email": seeded.email, "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Account is disabled"));
}

#[tokio::test]
async fn deactivation_cuts_off_live_sessions() {
    let app = TestApp::new().await;
    let (seeded, token) = app.seed_user(UserRole::User, None).await;

    let before = app
        .request(Method::GET, "/api/auth/me", None, Some(&token))
        .await;
    assert_eq!(before.status(), StatusCode::OK);

    let mut active: user::ActiveModel = seeded.into();
    active.is_active = Set(false);
    active.update(&*app.state.db).await.expect("disable account");

    // The token itself is still valid; the account check stops it anyway.
    let after = app
        .request(Method::GET, "/api/auth/me", None, Some(&token))
        .await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(after).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Account is disabled"));
}

#[tokio::test]
async fn me_requires_a_session() {
    let app = TestApp::new().await;
    let (user, token) = app.seed_user(UserRole::User, None).await;

    let anonymous = app.request(Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request(Method::GET, "/api/auth/me", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["user"]["email"], user.email.as_str());
}

#[tokio::test]
async fn role_gates_are_strict() {
    let app = TestApp::new().await;
    let (_, user_token) = app.seed_user(UserRole::User, None).await;
    let (_, admin_token) = app.seed_user(UserRole::Admin, None).await;

    let shopper_on_admin = app
        .request(Method::GET, "/api/admin/stats", None, Some(&user_token))
        .await;
    assert_eq!(shopper_on_admin.status(), StatusCode::FORBIDDEN);

    // Admin does not inherit the inventory or shopper surfaces.
    let admin_on_inventory = app
        .request(
            Method::GET,
            "/api/inventory/low-stock",
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(admin_on_inventory.status(), StatusCode::FORBIDDEN);

    let admin_on_cart = app
        .request(Method::GET, "/api/user/cart", None, Some(&admin_token))
        .await;
    assert_eq!(admin_on_cart.status(), StatusCode::FORBIDDEN);

    let admin_on_admin = app
        .request(Method::GET, "/api/admin/stats", None, Some(&admin_token))
        .await;
    assert_eq!(admin_on_admin.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = TestApp::new().await;
    let response = app.request(Method::POST, "/api/auth/logout", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("cleared cookie")
        .to_str()
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));
}
