//! Stock request lifecycle and the transfer it performs on receipt.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use rust_decimal_macros::dec;
use saree_api::entities::UserRole;
use serde_json::json;
use uuid::Uuid;

async fn advance(
    app: &TestApp,
    token: &str,
    request_id: &str,
    status: &str,
) -> axum::response::Response {
    app.request(
        Method::PATCH,
        &format!("/api/inventory/requests/{}/status", request_id),
        Some(json!({ "status": status })),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn receipt_moves_stock_from_the_central_pool_to_the_store_ledger() {
    let app = TestApp::new().await;
    let store = app.seed_store("Chennai Flagship").await;
    let (_, store_token) = app.seed_user(UserRole::Store, Some(store.id)).await;
    let (_, inv_token) = app.seed_user(UserRole::Inventory, None).await;
    let saree = app.seed_saree("Pochampally Ikat", dec!(90.00), 20, 5).await;

    let created = app
        .request(
            Method::POST,
            "/api/store/requests",
            Some(json!({ "saree_id": saree.id, "quantity": 10 })),
            Some(&store_token),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = response_json(created).await;
    assert_eq!(body["status"], "pending");
    let request_id = body["id"].as_str().unwrap().to_string();

    // The lifecycle cannot be skipped.
    let skipped = advance(&app, &inv_token, &request_id, "received").await;
    assert_eq!(skipped.status(), StatusCode::BAD_REQUEST);

    assert_eq!(
        advance(&app, &inv_token, &request_id, "approved").await.status(),
        StatusCode::OK
    );
    assert_eq!(
        advance(&app, &inv_token, &request_id, "dispatched").await.status(),
        StatusCode::OK
    );
    let received = advance(&app, &inv_token, &request_id, "received").await;
    assert_eq!(received.status(), StatusCode::OK);
    assert_eq!(response_json(received).await["status"], "received");

    let after = app.state.services.catalog.get_saree(saree.id).await.unwrap();
    assert_eq!(after.total_stock, 10);
    assert_eq!(after.online_stock, 5);

    let ledger = app
        .state
        .services
        .store_inventory
        .list_for_store(store.id)
        .await
        .unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].quantity, 10);
}

#[tokio::test]
async fn transfer_never_raids_the_online_share() {
    let app = TestApp::new().await;
    let store = app.seed_store("Coimbatore Branch").await;
    let (_, store_token) = app.seed_user(UserRole::Store, Some(store.id)).await;
    let (_, inv_token) = app.seed_user(UserRole::Inventory, None).await;
    // 10 total, 5 reserved online: at most 5 units can leave the pool.
    let saree = app.seed_saree("Sambalpuri Silk", dec!(110.00), 10, 5).await;

    let created = app
        .request(
            Method::POST,
            "/api/store/requests",
            Some(json!({ "saree_id": saree.id, "quantity": 6 })),
            Some(&store_token),
        )
        .await;
    let request_id = response_json(created).await["id"].as_str().unwrap().to_string();

    advance(&app, &inv_token, &request_id, "approved").await;
    advance(&app, &inv_token, &request_id, "dispatched").await;

    let received = advance(&app, &inv_token, &request_id, "received").await;
    assert_eq!(received.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Rolled back: pool unchanged, ledger empty, request still in transit.
    let after = app.state.services.catalog.get_saree(saree.id).await.unwrap();
    assert_eq!(after.total_stock, 10);
    let ledger = app
        .state
        .services
        .store_inventory
        .list_for_store(store.id)
        .await
        .unwrap();
    assert!(ledger.is_empty());

    let listed = app
        .request(Method::GET, "/api/store/requests", None, Some(&store_token))
        .await;
    let body = response_json(listed).await;
    assert_eq!(body[0]["status"], "dispatched");
}

#[tokio::test]
async fn rejected_requests_are_terminal() {
    let app = TestApp::new().await;
    let store = app.seed_store("Madurai Branch").await;
    let (_, store_token) = app.seed_user(UserRole::Store, Some(store.id)).await;
    let (_, inv_token) = app.seed_user(UserRole::Inventory, None).await;
    let saree = app.seed_saree("Gadwal Cotton", dec!(70.00), 30, 10).await;

    let created = app
        .request(
            Method::POST,
            "/api/store/requests",
            Some(json!({ "saree_id": saree.id, "quantity": 5 })),
            Some(&store_token),
        )
        .await;
    let request_id = response_json(created).await["id"].as_str().unwrap().to_string();

    assert_eq!(
        advance(&app, &inv_token, &request_id, "rejected").await.status(),
        StatusCode::OK
    );
    assert_eq!(
        advance(&app, &inv_token, &request_id, "approved").await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn unknown_products_and_foreign_roles_are_refused() {
    let app = TestApp::new().await;
    let store = app.seed_store("Salem Branch").await;
    let (_, store_token) = app.seed_user(UserRole::Store, Some(store.id)).await;

    let missing = app
        .request(
            Method::POST,
            "/api/store/requests",
            Some(json!({ "saree_id": Uuid::new_v4(), "quantity": 5 })),
            Some(&store_token),
        )
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    // The store role cannot approve its own requests.
    let forbidden = app
        .request(
            Method::PATCH,
            &format!("/api/inventory/requests/{}/status", Uuid::new_v4()),
            Some(json!({ "status": "approved" })),
            Some(&store_token),
        )
        .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}
