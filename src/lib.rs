pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use std::sync::Arc;

use axum::{middleware, response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use auth::AuthService;
use events::EventSender;
use services::{
    AddressService, CartService, CatalogService, OrderService, PincodeService,
    ReferenceDataService, StatsService, StockRequestService, StoreInventoryService,
    StoreSaleService, UserService, WishlistService,
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<config::AppConfig>,
    pub auth: Arc<AuthService>,
    pub event_sender: Arc<EventSender>,
    pub services: AppServices,
}

/// The service layer, one instance per concern, all sharing the pool.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: CatalogService,
    pub reference: ReferenceDataService,
    pub carts: CartService,
    pub wishlists: WishlistService,
    pub orders: OrderService,
    pub store_sales: StoreSaleService,
    pub store_inventory: StoreInventoryService,
    pub stock_requests: StockRequestService,
    pub users: UserService,
    pub addresses: AddressService,
    pub pincodes: PincodeService,
    pub stats: StatsService,
}

impl AppServices {
    pub fn new(
        db: Arc<DatabaseConnection>,
        auth: Arc<AuthService>,
        event_sender: Arc<EventSender>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(db.clone()),
            reference: ReferenceDataService::new(db.clone()),
            carts: CartService::new(db.clone()),
            wishlists: WishlistService::new(db.clone()),
            orders: OrderService::new(db.clone(), event_sender.clone()),
            store_sales: StoreSaleService::new(db.clone(), event_sender.clone()),
            store_inventory: StoreInventoryService::new(db.clone()),
            stock_requests: StockRequestService::new(db.clone(), event_sender),
            users: UserService::new(db.clone(), auth),
            addresses: AddressService::new(db.clone()),
            pincodes: PincodeService::new(db.clone()),
            stats: StatsService::new(db),
        }
    }
}

impl AppState {
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: Arc<config::AppConfig>,
        event_sender: Arc<EventSender>,
    ) -> Self {
        let auth = Arc::new(AuthService::new(auth::AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            token_expiration: std::time::Duration::from_secs(config.jwt_expiration_secs),
            cookie_name: config.session_cookie_name.clone(),
            secure_cookies: config.is_production(),
        }));
        let services = AppServices::new(db.clone(), auth.clone(), event_sender.clone());
        Self {
            db,
            config,
            auth,
            event_sender,
            services,
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}

/// All API routes under `/api`, grouped by role surface. The public group
/// carries no middleware; each role group is gated by its own guard and
/// every guarded route sees a `CurrentUser` extension.
pub fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .merge(handlers::auth::public_auth_router())
        .merge(handlers::catalog::public_router());

    let session = handlers::auth::session_router().route_layer(
        middleware::from_fn_with_state(state.clone(), auth::require_auth),
    );

    let user = Router::new()
        .merge(handlers::cart::router())
        .merge(handlers::wishlist::router())
        .merge(handlers::orders::router())
        .merge(handlers::addresses::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ));

    let admin = handlers::admin::router().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_admin,
    ));

    let inventory = handlers::inventory::router().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_inventory,
    ));

    let store = handlers::store::router().route_layer(middleware::from_fn_with_state(
        state,
        auth::require_store,
    ));

    Router::new()
        .merge(public)
        .merge(session)
        .nest("/user", user)
        .nest("/admin", admin)
        .nest("/inventory", inventory)
        .nest("/store", store)
}

/// The complete application: API, health probe, docs and the outer layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes(state.clone()))
        .merge(openapi::swagger_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .with_state(state)
}
