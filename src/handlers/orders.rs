use crate::{
    auth::CurrentUser,
    errors::ServiceError,
    handlers::common::{created_response, success_response},
    services::orders::PlaceOrderInput,
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(place_order))
        .route("/orders/:id", get(get_order))
}

#[utoipa::path(
    post,
    path = "/api/user/orders",
    request_body = PlaceOrderInput,
    responses(
        (status = 201, description = "Id of the created order"),
        (status = 400, description = "Empty cart or invalid input", body = crate::errors::ErrorResponse),
        (status = 422, description = "Not enough online stock", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<PlaceOrderInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.orders.place_order(user.user_id, input).await?;
    Ok(created_response(serde_json::json!({ "order_id": order.id })))
}

pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.orders.get_orders(user.user_id).await?,
    ))
}

pub async fn get_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let detail = state
        .services
        .orders
        .get_order(order_id, Some(user.user_id))
        .await?;
    Ok(success_response(detail))
}
