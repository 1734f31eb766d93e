use crate::{
    auth::CurrentUser,
    errors::ServiceError,
    handlers::common::{created_response, require_store_id, success_response},
    services::{stock_requests::CreateStockRequestInput, store_sales::RecordSaleInput},
    AppState,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

/// Store-role surface. Every route is scoped to the store on the session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/inventory", get(inventory))
        .route("/products", get(products))
        .route("/sales", get(list_sales).post(record_sale))
        .route("/requests", get(list_requests).post(create_request))
}

#[derive(Debug, Deserialize)]
pub struct SaleListQuery {
    pub limit: Option<u64>,
}

pub async fn stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let store_id = require_store_id(&user)?;
    Ok(success_response(
        state.services.stats.store_stats(store_id).await?,
    ))
}

pub async fn inventory(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let store_id = require_store_id(&user)?;
    Ok(success_response(
        state
            .services
            .store_inventory
            .list_for_store(store_id)
            .await?,
    ))
}

/// Catalog as sellable in a shop: active products on the shop channel,
/// each with this store's on-hand count.
pub async fn products(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let store_id = require_store_id(&user)?;
    Ok(success_response(
        state
            .services
            .store_inventory
            .shop_products(store_id)
            .await?,
    ))
}

pub async fn list_sales(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SaleListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let store_id = require_store_id(&user)?;
    Ok(success_response(
        state
            .services
            .store_sales
            .list_sales(store_id, query.limit)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/store/sales",
    request_body = RecordSaleInput,
    responses(
        (status = 201, description = "Sale recorded"),
        (status = 422, description = "Store ledger cannot cover the sale", body = crate::errors::ErrorResponse)
    ),
    tag = "store"
)]
pub async fn record_sale(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<RecordSaleInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let store_id = require_store_id(&user)?;
    let sale = state
        .services
        .store_sales
        .record_sale(store_id, user.user_id, input)
        .await?;
    Ok(created_response(sale))
}

pub async fn list_requests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let store_id = require_store_id(&user)?;
    Ok(success_response(
        state
            .services
            .stock_requests
            .list_requests(Some(store_id), None)
            .await?,
    ))
}

pub async fn create_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<CreateStockRequestInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let store_id = require_store_id(&user)?;
    let request = state
        .services
        .stock_requests
        .create_request(store_id, user.user_id, input)
        .await?;
    Ok(created_response(request))
}
