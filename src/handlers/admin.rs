use crate::{
    entities::{OrderStatus, UserRole},
    errors::ServiceError,
    handlers::{
        catalog,
        common::{created_response, no_content_response, success_response},
    },
    services::{
        pincodes::CreatePincodeInput,
        reference::{CategoryInput, ColorInput, CreateStoreInput, FabricInput, UpdateStoreInput},
        users::CreateUserInput,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Admin surface: dashboards, order oversight, account and reference data
/// management, full catalog control.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/orders", get(list_orders))
        .route("/orders/:id/status", patch(update_order_status))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/sarees",
            get(catalog::list_all_sarees).post(catalog::create_saree),
        )
        .route(
            "/sarees/:id",
            patch(catalog::update_saree).delete(catalog::delete_saree),
        )
        .route("/categories", post(create_category))
        .route(
            "/categories/:id",
            patch(update_category).delete(delete_category),
        )
        .route("/colors", post(create_color))
        .route("/colors/:id", patch(update_color).delete(delete_color))
        .route("/fabrics", post(create_fabric))
        .route("/fabrics/:id", patch(update_fabric).delete(delete_fabric))
        .route("/stores", get(list_stores).post(create_store))
        .route("/stores/:id", patch(update_store))
        .route("/pincodes", get(list_pincodes).post(create_pincode))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderStatusInput {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
}

pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(state.services.stats.admin_stats().await?))
}

pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
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

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.users.list_users(query.role).await?,
    ))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.services.users.create_user(input).await?;
    Ok(created_response(user))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(created_response(
        state.services.reference.create_category(input).await?,
    ))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CategoryInput>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.reference.update_category(id, input).await?,
    ))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.reference.delete_category(id).await?;
    Ok(no_content_response())
}

pub async fn create_color(
    State(state): State<AppState>,
    Json(input): Json<ColorInput>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(created_response(
        state.services.reference.create_color(input).await?,
    ))
}

pub async fn update_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ColorInput>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.reference.update_color(id, input).await?,
    ))
}

pub async fn delete_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.reference.delete_color(id).await?;
    Ok(no_content_response())
}

pub async fn create_fabric(
    State(state): State<AppState>,
    Json(input): Json<FabricInput>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(created_response(
        state.services.reference.create_fabric(input).await?,
    ))
}

pub async fn update_fabric(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<FabricInput>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.reference.update_fabric(id, input).await?,
    ))
}

pub async fn delete_fabric(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.reference.delete_fabric(id).await?;
    Ok(no_content_response())
}

pub async fn list_stores(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(state.services.reference.list_stores().await?))
}

pub async fn create_store(
    State(state): State<AppState>,
    Json(input): Json<CreateStoreInput>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(created_response(
        state.services.reference.create_store(input).await?,
    ))
}

pub async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateStoreInput>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.reference.update_store(id, input).await?,
    ))
}

pub async fn list_pincodes(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(state.services.pincodes.list().await?))
}

pub async fn create_pincode(
    State(state): State<AppState>,
    Json(input): Json<CreatePincodeInput>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(created_response(
        state.services.pincodes.create(input).await?,
    ))
}
