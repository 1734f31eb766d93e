//! Online checkout: cart to order, stock guarantees, ownership scoping.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use rust_decimal_macros::dec;
use saree_api::entities::UserRole;
use serde_json::json;

#[tokio::test]
async fn placing_an_order_empties_the_cart_and_charges_online_stock_only() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;
    let saree = app.seed_saree("Kanchipuram Silk", dec!(150.00), 10, 5).await;

    let add = app
        .request(
            Method::POST,
            "/api/user/cart",
            Some(json!({ "saree_id": saree.id, "quantity": 2 })),
            Some(&token),
        )
        .await;
    assert_eq!(add.status(), StatusCode::OK);

    // Adding the same product again merges into one line.
    app.request(
        Method::POST,
        "/api/user/cart",
        Some(json!({ "saree_id": saree.id, "quantity": 1 })),
        Some(&token),
    )
    .await;

    // One distinct product, so one cart row.
    let count = app
        .request(Method::GET, "/api/user/cart/count", None, Some(&token))
        .await;
    assert_eq!(response_json(count).await["count"], 1);

    let order = app
        .request(
            Method::POST,
            "/api/user/orders",
            Some(json!({
                "shipping_address": "14 Temple Street, Madurai",
                "phone": "9876543210"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(order.status(), StatusCode::CREATED);
    let order_id = response_json(order).await["order_id"]
        .as_str()
        .unwrap()
        .to_string();

    let detail = app
        .request(
            Method::GET,
            &format!("/api/user/orders/{}", order_id),
            None,
            Some(&token),
        )
        .await;
    let body = response_json(detail).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    let total: rust_decimal::Decimal = body["total_amount"].as_str().unwrap().parse().unwrap();
    assert_eq!(total, dec!(450.00));

    // Only the online pool shrinks. Total stock is untouched until a
    // physical transfer happens elsewhere.
    let after = app.state.services.catalog.get_saree(saree.id).await.unwrap();
    assert_eq!(after.online_stock, 2);
    assert_eq!(after.total_stock, 10);

    let count = app
        .request(Method::GET, "/api/user/cart/count", None, Some(&token))
        .await;
    assert_eq!(response_json(count).await["count"], 0);
}

#[tokio::test]
async fn empty_cart_cannot_be_ordered() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;

    let response = app
        .request(
            Method::POST,
            "/api/user/orders",
            Some(json!({
                "shipping_address": "14 Temple Street, Madurai",
                "phone": "9876543210"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("Cart is empty"));
}

#[tokio::test]
async fn oversell_is_rejected_and_rolls_back() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;
    let saree = app.seed_saree("Banarasi Weave", dec!(200.00), 10, 2).await;

    app.request(
        Method::POST,
        "/api/user/cart",
        Some(json!({ "saree_id": saree.id, "quantity": 5 })),
        Some(&token),
    )
    .await;

    let response = app
        .request(
            Method::POST,
            "/api/user/orders",
            Some(json!({
                "shipping_address": "14 Temple Street, Madurai",
                "phone": "9876543210"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing committed: stock intact, cart intact, no order on record.
    let after = app.state.services.catalog.get_saree(saree.id).await.unwrap();
    assert_eq!(after.online_stock, 2);

    let count = app
        .request(Method::GET, "/api/user/cart/count", None, Some(&token))
        .await;
    assert_eq!(response_json(count).await["count"], 1);

    let orders = app
        .request(Method::GET, "/api/user/orders", None, Some(&token))
        .await;
    assert_eq!(response_json(orders).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn orders_are_scoped_to_their_owner() {
    let app = TestApp::new().await;
    let (_, owner_token) = app.seed_user(UserRole::User, None).await;
    let (_, other_token) = app.seed_user(UserRole::User, None).await;
    let saree = app.seed_saree("Chanderi Cotton", dec!(80.00), 10, 5).await;

    app.request(
        Method::POST,
        "/api/user/cart",
        Some(json!({ "saree_id": saree.id, "quantity": 1 })),
        Some(&owner_token),
    )
    .await;
    let order = app
        .request(
            Method::POST,
            "/api/user/orders",
            Some(json!({
                "shipping_address": "14 Temple Street, Madurai",
                "phone": "9876543210"
            })),
            Some(&owner_token),
        )
        .await;
    let order_id = response_json(order).await["order_id"]
        .as_str()
        .unwrap()
        .to_string();

    let own = app
        .request(
            Method::GET,
            &format!("/api/user/orders/{}", order_id),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(own.status(), StatusCode::OK);
    let detail = response_json(own).await;
    assert_eq!(detail["items"].as_array().unwrap().len(), 1);

    let foreign = app
        .request(
            Method::GET,
            &format!("/api/user/orders/{}", order_id),
            None,
            Some(&other_token),
        )
        .await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_can_move_order_status() {
    let app = TestApp::new().await;
    let (_, user_token) = app.seed_user(UserRole::User, None).await;
    let (_, admin_token) = app.seed_user(UserRole::Admin, None).await;
    let saree = app.seed_saree("Tussar Silk", dec!(120.00), 10, 5).await;

    app.request(
        Method::POST,
        "/api/user/cart",
        Some(json!({ "saree_id": saree.id, "quantity": 1 })),
        Some(&user_token),
    )
    .await;
    let order = app
        .request(
            Method::POST,
            "/api/user/orders",
            Some(json!({
                "shipping_address": "14 Temple Street, Madurai",
                "phone": "9876543210"
            })),
            Some(&user_token),
        )
        .await;
    let order_id = response_json(order).await["order_id"]
        .as_str()
        .unwrap()
        .to_string();

    let updated = app
        .request(
            Method::PATCH,
            &format!("/api/admin/orders/{}/status", order_id),
            Some(json!({ "status": "shipped" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(response_json(updated).await["status"], "shipped");
}
