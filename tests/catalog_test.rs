//! Public catalog browsing, stock bounds and the inventory views built on it.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use rust_decimal_macros::dec;
use saree_api::{
    entities::{DistributionChannel, UserRole},
    services::catalog::{CreateSareeInput, UpdateSareeInput},
};
use serde_json::json;
use uuid::Uuid;

async fn seed_channelled(
    app: &TestApp,
    name: &str,
    channel: DistributionChannel,
) -> saree_api::entities::SareeModel {
    app.state
        .services
        .catalog
        .create_saree(CreateSareeInput {
            name: name.to_string(),
            description: None,
            price: dec!(100.00),
            category_id: None,
            color_id: None,
            fabric_id: None,
            image_url: None,
            sku: None,
            total_stock: 20,
            online_stock: 10,
            distribution_channel: channel,
            is_featured: false,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn public_listing_is_online_scoped() {
    let app = TestApp::new().await;
    let online = seed_channelled(&app, "Web Exclusive", DistributionChannel::Online).await;
    let shop = seed_channelled(&app, "Shop Exclusive", DistributionChannel::Shop).await;
    let both = seed_channelled(&app, "Everywhere", DistributionChannel::Both).await;

    let listed_ids = |body: serde_json::Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect()
    };

    // No query string: dual-channel products are in, shop-only stays out.
    let response = app.request(Method::GET, "/api/sarees", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let ids = listed_ids(response_json(response).await);
    assert!(ids.contains(&online.id.to_string()));
    assert!(ids.contains(&both.id.to_string()));
    assert!(!ids.contains(&shop.id.to_string()));

    // The channel filter is not caller-controlled on the storefront.
    let response = app
        .request(Method::GET, "/api/sarees?channel=shop", None, None)
        .await;
    let ids = listed_ids(response_json(response).await);
    assert!(!ids.contains(&shop.id.to_string()));
    assert!(ids.contains(&online.id.to_string()));
}

#[tokio::test]
async fn soft_deleted_products_leave_the_public_catalog() {
    let app = TestApp::new().await;
    let (_, admin_token) = app.seed_user(UserRole::Admin, None).await;
    let saree = app.seed_saree("Retired Weave", dec!(90.00), 5, 5).await;

    let deleted = app
        .request(
            Method::DELETE,
            &format!("/api/admin/sarees/{}", saree.id),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let listed = app.request(Method::GET, "/api/sarees", None, None).await;
    assert!(response_json(listed).await.as_array().unwrap().is_empty());

    // Admin listings still see it.
    let admin_listed = app
        .request(Method::GET, "/api/admin/sarees", None, Some(&admin_token))
        .await;
    assert_eq!(response_json(admin_listed).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn price_sort_orders_the_listing() {
    let app = TestApp::new().await;
    app.seed_saree("Mid", dec!(150.00), 10, 5).await;
    app.seed_saree("Cheap", dec!(50.00), 10, 5).await;
    app.seed_saree("Dear", dec!(300.00), 10, 5).await;

    let response = app
        .request(Method::GET, "/api/sarees?sort=price_low", None, None)
        .await;
    let body = response_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cheap", "Mid", "Dear"]);
}

#[tokio::test]
async fn online_stock_can_never_exceed_total_stock() {
    let app = TestApp::new().await;
    let saree = app.seed_saree("Bounded", dec!(100.00), 10, 5).await;

    let err = app
        .state
        .services
        .catalog
        .set_stock(saree.id, 10, 12)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    // Partial updates are checked against the resulting pair.
    let err = app
        .state
        .services
        .catalog
        .update_saree(
            saree.id,
            UpdateSareeInput {
                online_stock: Some(11),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn low_stock_view_flags_thin_products() {
    let app = TestApp::new().await;
    let (_, inv_token) = app.seed_user(UserRole::Inventory, None).await;
    app.seed_saree("Running Out", dec!(100.00), 3, 1).await;
    app.seed_saree("Well Stocked", dec!(100.00), 80, 40).await;

    let response = app
        .request(Method::GET, "/api/inventory/low-stock", None, Some(&inv_token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Running Out");
}

#[tokio::test]
async fn stock_distribution_accounts_for_store_ledgers() {
    let app = TestApp::new().await;
    let (_, inv_token) = app.seed_user(UserRole::Inventory, None).await;
    let store = app.seed_store("Distribution Store").await;
    let saree = app.seed_saree("Spread Out", dec!(100.00), 30, 10).await;
    saree_api::services::StoreInventoryService::increment(&*app.state.db, store.id, saree.id, 7)
        .await
        .unwrap();

    let response = app
        .request(
            Method::GET,
            "/api/inventory/stock-distribution",
            None,
            Some(&inv_token),
        )
        .await;
    let body = response_json(response).await;
    let row = &body.as_array().unwrap()[0];
    assert_eq!(row["total_stock"], 30);
    assert_eq!(row["online_stock"], 10);
    assert_eq!(row["store_stock"], 7);
}

#[tokio::test]
async fn pincode_check_reports_serviceability() {
    let app = TestApp::new().await;
    let (_, admin_token) = app.seed_user(UserRole::Admin, None).await;
    app.request(
        Method::POST,
        "/api/admin/pincodes",
        Some(json!({ "pincode": "600001", "city": "Chennai", "state": "Tamil Nadu" })),
        Some(&admin_token),
    )
    .await;

    let served = app
        .request(Method::GET, "/api/pincodes/600001/check", None, None)
        .await;
    assert_eq!(served.status(), StatusCode::OK);
    let body = response_json(served).await;
    assert_eq!(body["serviceable"], true);
    assert_eq!(body["city"], "Chennai");

    let unserved = app
        .request(Method::GET, "/api/pincodes/999999/check", None, None)
        .await;
    let body = response_json(unserved).await;
    assert_eq!(body["serviceable"], false);
}

#[tokio::test]
async fn saree_detail_carries_its_reference_rows() {
    let app = TestApp::new().await;
    let (_, admin_token) = app.seed_user(UserRole::Admin, None).await;

    let category = app
        .request(
            Method::POST,
            "/api/admin/categories",
            Some(json!({ "name": "Wedding", "description": "Bridal wear" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(category.status(), StatusCode::CREATED);
    let category_id = response_json(category).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let saree = app
        .state
        .services
        .catalog
        .create_saree(CreateSareeInput {
            name: "Bridal Kanchipuram".to_string(),
            description: None,
            price: dec!(500.00),
            category_id: Some(category_id.parse().unwrap()),
            color_id: None,
            fabric_id: None,
            image_url: None,
            sku: None,
            total_stock: 10,
            online_stock: 5,
            distribution_channel: DistributionChannel::Both,
            is_featured: true,
        })
        .await
        .unwrap();

    let detail = app
        .request(Method::GET, &format!("/api/sarees/{}", saree.id), None, None)
        .await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body = response_json(detail).await;
    assert_eq!(body["name"], "Bridal Kanchipuram");
    assert_eq!(body["category"]["name"], "Wedding");
    assert!(body["color"].is_null());
    assert!(body["fabric"].is_null());
}

#[tokio::test]
async fn reference_names_are_unique_and_deletes_are_soft() {
    let app = TestApp::new().await;
    let (_, admin_token) = app.seed_user(UserRole::Admin, None).await;

    let created = app
        .request(
            Method::POST,
            "/api/admin/colors",
            Some(json!({ "name": "Maroon", "hex_code": "#800000" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let color_id = response_json(created).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let duplicate = app
        .request(
            Method::POST,
            "/api/admin/colors",
            Some(json!({ "name": "Maroon", "hex_code": "#803000" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let updated = app
        .request(
            Method::PATCH,
            &format!("/api/admin/colors/{}", color_id),
            Some(json!({ "name": "Deep Maroon", "hex_code": "#800000" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(response_json(updated).await["name"], "Deep Maroon");

    let deleted = app
        .request(
            Method::DELETE,
            &format!("/api/admin/colors/{}", color_id),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // Gone from the public lookup once deactivated.
    let listed = app.request(Method::GET, "/api/colors", None, None).await;
    assert!(response_json(listed).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_saree_is_a_404() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::GET,
            &format!("/api/sarees/{}", Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
