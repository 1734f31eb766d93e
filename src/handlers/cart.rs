use crate::{
    auth::CurrentUser,
    errors::ServiceError,
    handlers::common::{no_content_response, success_response},
    services::carts::AddToCartInput,
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, patch},
    Extension, Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/cart/count", get(cart_count))
        .route("/cart/:id", patch(update_item).delete(remove_item))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityInput {
    pub quantity: i32,
}

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.carts.get_cart(user.user_id).await?,
    ))
}

pub async fn cart_count(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let count = state.services.carts.count(user.user_id).await?;
    Ok(success_response(serde_json::json!({ "count": count })))
}

#[utoipa::path(
    post,
    path = "/api/user/cart",
    request_body = AddToCartInput,
    responses(
        (status = 200, description = "Cart line after the add"),
        (status = 404, description = "Unknown saree", body = crate::errors::ErrorResponse)
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<AddToCartInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let line = state.services.carts.add_to_cart(user.user_id, input).await?;
    Ok(success_response(line))
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(item_id): Path<Uuid>,
    Json(input): Json<UpdateQuantityInput>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .carts
        .update_quantity(user.user_id, item_id, input.quantity)
        .await?;
    Ok(no_content_response())
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.carts.clear(user.user_id).await?;
    Ok(no_content_response())
}

pub async fn remove_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .carts
        .remove_item(user.user_id, item_id)
        .await?;
    Ok(no_content_response())
}
