use crate::{
    auth::CurrentUser,
    entities::{DistributionChannel, RequestStatus},
    errors::ServiceError,
    handlers::{admin::OrderStatusInput, catalog, common::success_response},
    services::catalog::LOW_STOCK_THRESHOLD,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
    Extension, Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Inventory-role surface: central stock control, stock request approvals
/// and order fulfilment.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/low-stock", get(low_stock))
        .route("/stock-distribution", get(stock_distribution))
        .route("/requests", get(list_requests))
        .route("/requests/:id/status", patch(update_request_status))
        .route("/orders", get(list_orders))
        .route("/orders/:id/status", patch(update_order_status))
        .route(
            "/sarees",
            get(catalog::list_all_sarees).post(catalog::create_saree),
        )
        .route(
            "/sarees/:id",
            patch(catalog::update_saree).delete(catalog::delete_saree),
        )
        .route("/sarees/:id/stock", patch(set_stock))
        .route("/sarees/:id/distribution", patch(set_distribution))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStockInput {
    pub total_stock: i32,
    pub online_stock: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetDistributionInput {
    pub channel: DistributionChannel,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RequestStatusInput {
    pub status: RequestStatus,
}

#[derive(Debug, Deserialize)]
pub struct RequestListQuery {
    pub status: Option<RequestStatus>,
}

pub async fn low_stock(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.catalog.low_stock(LOW_STOCK_THRESHOLD).await?,
    ))
}

pub async fn stock_distribution(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.catalog.stock_distribution().await?,
    ))
}

pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<RequestListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state
            .services
            .stock_requests
            .list_requests(None, query.status)
            .await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/inventory/requests/{id}/status",
    request_body = RequestStatusInput,
    responses(
        (status = 200, description = "Request after the transition"),
        (status = 400, description = "Illegal transition", body = crate::errors::ErrorResponse),
        (status = 422, description = "Central stock cannot cover the transfer", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn update_request_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(request_id): Path<Uuid>,
    Json(input): Json<RequestStatusInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = state
        .services
        .stock_requests
        .update_status(request_id, input.status, user.user_id)
        .await?;
    Ok(success_response(request))
}

pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<super::admin::OrderListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state
            .services
            .orders
            .list_all(query.status, query.limit)
            .await?,
    ))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<OrderStatusInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .orders
        .update_status(order_id, input.status)
        .await?;
    Ok(success_response(order))
}

pub async fn set_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SetStockInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let saree = state
        .services
        .catalog
        .set_stock(id, input.total_stock, input.online_stock)
        .await?;
    Ok(success_response(saree))
}

pub async fn set_distribution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SetDistributionInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let saree = state
        .services
        .catalog
        .set_distribution_channel(id, input.channel)
        .await?;
    Ok(success_response(saree))
}
