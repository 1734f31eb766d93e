//! Shopper cart and wishlist behavior.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use rust_decimal_macros::dec;
use saree_api::entities::UserRole;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn cart_lines_merge_and_update() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;
    let saree = app.seed_saree("Paithani Silk", dec!(180.00), 20, 10).await;

    app.request(
        Method::POST,
        "/api/user/cart",
        Some(json!({ "saree_id": saree.id, "quantity": 2 })),
        Some(&token),
    )
    .await;
    app.request(
        Method::POST,
        "/api/user/cart",
        Some(json!({ "saree_id": saree.id, "quantity": 3 })),
        Some(&token),
    )
    .await;

    let cart = app
        .request(Method::GET, "/api/user/cart", None, Some(&token))
        .await;
    let body = response_json(cart).await;
    let lines = body.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 5);
    assert_eq!(lines[0]["saree"]["name"], "Paithani Silk");
    let line_id = lines[0]["id"].as_str().unwrap().to_string();

    let updated = app
        .request(
            Method::PATCH,
            &format!("/api/user/cart/{}", line_id),
            Some(json!({ "quantity": 1 })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::NO_CONTENT);

    let removed = app
        .request(
            Method::DELETE,
            &format!("/api/user/cart/{}", line_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let count = app
        .request(Method::GET, "/api/user/cart/count", None, Some(&token))
        .await;
    assert_eq!(response_json(count).await["count"], 0);
}

#[tokio::test]
async fn clearing_the_cart_drops_every_line() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;
    let first = app.seed_saree("Sambalpuri Ikat", dec!(110.00), 20, 10).await;
    let second = app.seed_saree("Pochampally Ikat", dec!(95.00), 20, 10).await;

    for saree in [&first, &second] {
        app.request(
            Method::POST,
            "/api/user/cart",
            Some(json!({ "saree_id": saree.id, "quantity": 2 })),
            Some(&token),
        )
        .await;
    }

    let cleared = app
        .request(Method::DELETE, "/api/user/cart", None, Some(&token))
        .await;
    assert_eq!(cleared.status(), StatusCode::NO_CONTENT);

    let count = app
        .request(Method::GET, "/api/user/cart/count", None, Some(&token))
        .await;
    assert_eq!(response_json(count).await["count"], 0);
}

#[tokio::test]
async fn carts_are_private_per_user() {
    let app = TestApp::new().await;
    let (_, owner) = app.seed_user(UserRole::User, None).await;
    let (_, other) = app.seed_user(UserRole::User, None).await;
    let saree = app.seed_saree("Bandhani Print", dec!(75.00), 20, 10).await;

    app.request(
        Method::POST,
        "/api/user/cart",
        Some(json!({ "saree_id": saree.id, "quantity": 1 })),
        Some(&owner),
    )
    .await;

    let cart = app
        .request(Method::GET, "/api/user/cart", None, Some(&owner))
        .await;
    let line_id = response_json(cart).await[0]["id"].as_str().unwrap().to_string();

    // A different shopper cannot touch someone else's line.
    let foreign = app
        .request(
            Method::DELETE,
            &format!("/api/user/cart/{}", line_id),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inactive_products_cannot_be_carted() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;
    let saree = app.seed_saree("Phased Out", dec!(75.00), 20, 10).await;
    app.state.services.catalog.delete_saree(saree.id).await.unwrap();

    let response = app
        .request(
            Method::POST,
            "/api/user/cart",
            Some(json!({ "saree_id": saree.id, "quantity": 1 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wishlist_is_idempotent() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;
    let saree = app.seed_saree("Patola Weave", dec!(320.00), 20, 10).await;

    app.request(
        Method::POST,
        "/api/user/wishlist",
        Some(json!({ "saree_id": saree.id })),
        Some(&token),
    )
    .await;
    // Wishing twice does not duplicate the entry.
    app.request(
        Method::POST,
        "/api/user/wishlist",
        Some(json!({ "saree_id": saree.id })),
        Some(&token),
    )
    .await;

    let count = app
        .request(Method::GET, "/api/user/wishlist/count", None, Some(&token))
        .await;
    assert_eq!(response_json(count).await["count"], 1);

    let check = app
        .request(
            Method::GET,
            &format!("/api/user/wishlist/{}/check", saree.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response_json(check).await["wishlisted"], true);

    let removed = app
        .request(
            Method::DELETE,
            &format!("/api/user/wishlist/{}", saree.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let list = app
        .request(Method::GET, "/api/user/wishlist", None, Some(&token))
        .await;
    assert!(response_json(list).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_products_are_refused() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;

    let response = app
        .request(
            Method::POST,
            "/api/user/wishlist",
            Some(json!({ "saree_id": Uuid::new_v4() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
