#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use rust_decimal::Decimal;
use saree_api::{
    config::AppConfig,
    db,
    entities::{DistributionChannel, StoreModel, UserModel, UserRole},
    events::EventSender,
    services::{catalog::CreateSareeInput, reference::CreateStoreInput, users::CreateUserInput},
    AppState,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

/// Test harness: full application over a private in-memory SQLite database.
/// A single pooled connection keeps the in-memory schema alive across calls.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        let cfg = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            jwt_expiration_secs: 3600,
            session_cookie_name: "token".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            log_level: "warn".to_string(),
            log_json: false,
            auto_migrate: true,
            db_max_connections: 1,
            db_min_connections: 1,
            db_connect_timeout_secs: 30,
            db_idle_timeout_secs: 3600,
            event_channel_capacity: 64,
        };

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("test database");
        db::run_migrations(&pool).await.expect("migrations");

        let (event_tx, event_rx) = mpsc::channel(cfg.event_channel_capacity);
        let event_sender = Arc::new(EventSender::new(event_tx));
        let event_task = tokio::spawn(saree_api::events::process_events(event_rx));

        let state = AppState::new(Arc::new(pool), Arc::new(cfg), event_sender);
        let router = saree_api::app(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// Create an account in the given role and hand back a valid session token.
    pub async fn seed_user(&self, role: UserRole, store_id: Option<Uuid>) -> (UserModel, String) {
        let user = self
            .state
            .services
            .users
            .create_user(CreateUserInput {
                email: format!("{}@example.com", Uuid::new_v4()),
                password: "secret123".to_string(),
                name: "Test Account".to_string(),
                phone: None,
                role,
                store_id,
            })
            .await
            .expect("seed user");
        let token = self.state.auth.issue_token(&user).expect("issue token");
        (user, token)
    }

    pub async fn seed_store(&self, name: &str) -> StoreModel {
        self.state
            .services
            .reference
            .create_store(CreateStoreInput {
                name: name.to_string(),
                address: "12 Market Road, Chennai".to_string(),
                phone: None,
                manager_id: None,
            })
            .await
            .expect("seed store")
    }

    pub async fn seed_saree(
        &self,
        name: &str,
        price: Decimal,
        total_stock: i32,
        online_stock: i32,
    ) -> saree_api::entities::SareeModel {
        self.state
            .services
            .catalog
            .create_saree(CreateSareeInput {
                name: name.to_string(),
                description: None,
                price,
                category_id: None,
                color_id: None,
                fabric_id: None,
                image_url: None,
                sku: None,
                total_stock,
                online_stock,
                distribution_channel: DistributionChannel::Both,
                is_featured: false,
            })
            .await
            .expect("seed saree")
    }

    /// Fire one request at the app. The token, when given, rides the session
    /// cookie exactly as a browser would send it.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        json: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(
                header::COOKIE,
                format!("{}={}", self.state.auth.cookie_name(), token),
            );
        }
        let request = match json {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.router.clone().oneshot(request).await.expect("response")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    serde_json::from_slice(&bytes).expect("json body")
}
