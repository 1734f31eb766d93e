use crate::{
    auth::CurrentUser,
    errors::ServiceError,
    handlers::common::{created_response, no_content_response, success_response},
    services::addresses::AddressInput,
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/addresses", get(list_addresses).post(create_address))
        .route("/addresses/:id", patch(update_address).delete(delete_address))
        .route("/addresses/:id/default", patch(set_default_address))
}

pub async fn list_addresses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.addresses.list(user.user_id).await?,
    ))
}

pub async fn create_address(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<AddressInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let address = state.services.addresses.create(user.user_id, input).await?;
    Ok(created_response(address))
}

pub async fn update_address(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(address_id): Path<Uuid>,
    Json(input): Json<AddressInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let address = state
        .services
        .addresses
        .update(user.user_id, address_id, input)
        .await?;
    Ok(success_response(address))
}

pub async fn set_default_address(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(address_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let address = state
        .services
        .addresses
        .set_default(user.user_id, address_id)
        .await?;
    Ok(success_response(address))
}

pub async fn delete_address(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(address_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .addresses
        .delete(user.user_id, address_id)
        .await?;
    Ok(no_content_response())
}
