//! Shipping address book: validation and the single-default invariant.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use saree_api::entities::UserRole;
use serde_json::json;

fn address(name: &str, pincode: &str, is_default: bool) -> serde_json::Value {
    json!({
        "name": name,
        "phone": "9876543210",
        "locality": "12 Gandhi Road, Mylapore",
        "city": "Chennai",
        "pincode": pincode,
        "is_default": is_default
    })
}

#[tokio::test]
async fn only_one_address_is_default_at_a_time() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;

    let first = app
        .request(
            Method::POST,
            "/api/user/addresses",
            Some(address("Home", "600004", true)),
            Some(&token),
        )
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .request(
            Method::POST,
            "/api/user/addresses",
            Some(address("Office", "600002", true)),
            Some(&token),
        )
        .await;
    let second_id = response_json(second).await["id"].as_str().unwrap().to_string();

    let listed = app
        .request(Method::GET, "/api/user/addresses", None, Some(&token))
        .await;
    let body = response_json(listed).await;
    let defaults: Vec<bool> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["is_default"].as_bool().unwrap())
        .collect();
    assert_eq!(defaults.iter().filter(|d| **d).count(), 1);
    // Default sorts first.
    assert_eq!(body[0]["id"], second_id.as_str());

    // Flipping the default back via the dedicated endpoint.
    let first_id = body
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["name"] == "Home")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    let flipped = app
        .request(
            Method::PATCH,
            &format!("/api/user/addresses/{}/default", first_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(flipped.status(), StatusCode::OK);

    let listed = app
        .request(Method::GET, "/api/user/addresses", None, Some(&token))
        .await;
    let body = response_json(listed).await;
    for entry in body.as_array().unwrap() {
        assert_eq!(entry["is_default"] == true, entry["id"] == first_id.as_str());
    }
}

#[tokio::test]
async fn malformed_phone_and_pincode_are_rejected() {
    let app = TestApp::new().await;
    let (_, token) = app.seed_user(UserRole::User, None).await;

    let bad_pincode = app
        .request(
            Method::POST,
            "/api/user/addresses",
            Some(address("Home", "60000", false)),
            Some(&token),
        )
        .await;
    assert_eq!(bad_pincode.status(), StatusCode::BAD_REQUEST);

    let mut bad_phone = address("Home", "600004", false);
    bad_phone["phone"] = json!("98-76-54");
    let response = app
        .request(Method::POST, "/api/user/addresses", Some(bad_phone), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn addresses_are_scoped_to_their_owner() {
    let app = TestApp::new().await;
    let (_, owner) = app.seed_user(UserRole::User, None).await;
    let (_, other) = app.seed_user(UserRole::User, None).await;

    let created = app
        .request(
            Method::POST,
            "/api/user/addresses",
            Some(address("Home", "600004", true)),
            Some(&owner),
        )
        .await;
    let id = response_json(created).await["id"].as_str().unwrap().to_string();

    let foreign_delete = app
        .request(
            Method::DELETE,
            &format!("/api/user/addresses/{}", id),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(foreign_delete.status(), StatusCode::NOT_FOUND);

    let owner_delete = app
        .request(
            Method::DELETE,
            &format!("/api/user/addresses/{}", id),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(owner_delete.status(), StatusCode::NO_CONTENT);
}
