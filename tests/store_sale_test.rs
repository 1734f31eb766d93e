//! In-store sales against the store's own ledger, plus the store dashboard.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use saree_api::{entities::UserRole, services::StoreInventoryService};
use serde_json::json;

#[tokio::test]
async fn a_sale_decrements_the_store_ledger_only() {
    let app = TestApp::new().await;
    let store = app.seed_store("T Nagar Showroom").await;
    let (_, token) = app.seed_user(UserRole::Store, Some(store.id)).await;
    let saree = app.seed_saree("Mysore Silk", dec!(250.00), 50, 20).await;
    StoreInventoryService::increment(&*app.state.db, store.id, saree.id, 8)
        .await
        .unwrap();

    let sale = app
        .request(
            Method::POST,
            "/api/store/sales",
            Some(json!({
                "customer_name": "Walk-in customer",
                "items": [{ "saree_id": saree.id, "quantity": 3, "price": "250.00" }]
            })),
            Some(&token),
        )
        .await;
    assert_eq!(sale.status(), StatusCode::CREATED);
    let body = response_json(sale).await;
    let total: Decimal = body["total_amount"].as_str().unwrap().parse().unwrap();
    assert_eq!(total, dec!(750.00));

    let ledger = app
        .state
        .services
        .store_inventory
        .list_for_store(store.id)
        .await
        .unwrap();
    assert_eq!(ledger[0].quantity, 5);

    // The central pools never move for an in-store sale.
    let after = app.state.services.catalog.get_saree(saree.id).await.unwrap();
    assert_eq!(after.total_stock, 50);
    assert_eq!(after.online_stock, 20);
}

#[tokio::test]
async fn the_counter_price_wins_over_the_catalog_price() {
    let app = TestApp::new().await;
    let store = app.seed_store("Madurai Showroom").await;
    let (_, token) = app.seed_user(UserRole::Store, Some(store.id)).await;
    let saree = app.seed_saree("Gadwal Silk", dec!(300.00), 50, 20).await;
    StoreInventoryService::increment(&*app.state.db, store.id, saree.id, 4)
        .await
        .unwrap();

    // Sold at a festival discount; the total follows the charged price.
    let sale = app
        .request(
            Method::POST,
            "/api/store/sales",
            Some(json!({
                "items": [{ "saree_id": saree.id, "quantity": 2, "price": "270.00" }]
            })),
            Some(&token),
        )
        .await;
    assert_eq!(sale.status(), StatusCode::CREATED);
    let body = response_json(sale).await;
    let total: Decimal = body["total_amount"].as_str().unwrap().parse().unwrap();
    assert_eq!(total, dec!(540.00));
}

#[tokio::test]
async fn a_sale_cannot_exceed_what_the_store_holds() {
    let app = TestApp::new().await;
    let store = app.seed_store("Anna Nagar Outlet").await;
    let (_, token) = app.seed_user(UserRole::Store, Some(store.id)).await;
    let saree = app.seed_saree("Kota Doria", dec!(60.00), 50, 20).await;
    StoreInventoryService::increment(&*app.state.db, store.id, saree.id, 2)
        .await
        .unwrap();

    let sale = app
        .request(
            Method::POST,
            "/api/store/sales",
            Some(json!({ "items": [{ "saree_id": saree.id, "quantity": 3, "price": "60.00" }] })),
            Some(&token),
        )
        .await;
    assert_eq!(sale.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Rolled back entirely: ledger untouched, nothing recorded.
    let ledger = app
        .state
        .services
        .store_inventory
        .list_for_store(store.id)
        .await
        .unwrap();
    assert_eq!(ledger[0].quantity, 2);

    let sales = app
        .request(Method::GET, "/api/store/sales", None, Some(&token))
        .await;
    assert!(response_json(sales).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn an_empty_sale_is_rejected() {
    let app = TestApp::new().await;
    let store = app.seed_store("Velachery Outlet").await;
    let (_, token) = app.seed_user(UserRole::Store, Some(store.id)).await;

    let sale = app
        .request(
            Method::POST,
            "/api/store/sales",
            Some(json!({ "items": [] })),
            Some(&token),
        )
        .await;
    assert_eq!(sale.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_dashboard_reflects_the_day() {
    let app = TestApp::new().await;
    let store = app.seed_store("Pondicherry Outlet").await;
    let (_, token) = app.seed_user(UserRole::Store, Some(store.id)).await;
    let saree = app.seed_saree("Ilkal Cotton", dec!(100.00), 40, 10).await;
    StoreInventoryService::increment(&*app.state.db, store.id, saree.id, 6)
        .await
        .unwrap();

    app.request(
        Method::POST,
        "/api/store/sales",
        Some(json!({ "items": [{ "saree_id": saree.id, "quantity": 2, "price": "100.00" }] })),
        Some(&token),
    )
    .await;
    app.request(
        Method::POST,
        "/api/store/requests",
        Some(json!({ "saree_id": saree.id, "quantity": 5 })),
        Some(&token),
    )
    .await;

    let stats = app
        .request(Method::GET, "/api/store/stats", None, Some(&token))
        .await;
    assert_eq!(stats.status(), StatusCode::OK);
    let body = response_json(stats).await;
    assert_eq!(body["today_sales"], 1);
    let revenue: Decimal = body["today_revenue"].as_str().unwrap().parse().unwrap();
    assert_eq!(revenue, dec!(200.00));
    assert_eq!(body["total_inventory"], 4);
    assert_eq!(body["pending_requests"], 1);
}

#[tokio::test]
async fn shop_products_report_the_store_on_hand_count() {
    let app = TestApp::new().await;
    let store = app.seed_store("Coimbatore Outlet").await;
    let (_, token) = app.seed_user(UserRole::Store, Some(store.id)).await;
    let stocked = app.seed_saree("Arani Silk", dec!(150.00), 30, 10).await;
    app.seed_saree("Unstocked Weave", dec!(90.00), 30, 10).await;
    StoreInventoryService::increment(&*app.state.db, store.id, stocked.id, 6)
        .await
        .unwrap();

    let response = app
        .request(Method::GET, "/api/store/products", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 2);
    let on_hand_of = |name: &str| {
        products
            .iter()
            .find(|p| p["name"] == name)
            .unwrap()["on_hand"]
            .as_i64()
            .unwrap()
    };
    assert_eq!(on_hand_of("Arani Silk"), 6);
    assert_eq!(on_hand_of("Unstocked Weave"), 0);
}

#[tokio::test]
async fn sessions_without_a_store_are_refused() {
    let app = TestApp::new().await;
    let store = app.seed_store("Trichy Outlet").await;
    let (user, _) = app.seed_user(UserRole::Store, Some(store.id)).await;

    // A token minted before the account lost its store assignment.
    let mut detached = user.clone();
    detached.store_id = None;
    let token = app.state.auth.issue_token(&detached).unwrap();

    let response = app
        .request(Method::GET, "/api/store/inventory", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
