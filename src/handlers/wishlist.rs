use crate::{
    auth::CurrentUser,
    errors::ServiceError,
    handlers::common::{no_content_response, success_response},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(get_wishlist).post(add_to_wishlist))
        .route("/wishlist/count", get(wishlist_count))
        .route("/wishlist/:saree_id", delete(remove_from_wishlist))
        .route("/wishlist/:saree_id/check", get(check_wishlisted))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToWishlistInput {
    pub saree_id: Uuid,
}

pub async fn get_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.wishlists.get_wishlist(user.user_id).await?,
    ))
}

pub async fn wishlist_count(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let count = state.services.wishlists.count(user.user_id).await?;
    Ok(success_response(serde_json::json!({ "count": count })))
}

pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<AddToWishlistInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state
        .services
        .wishlists
        .add(user.user_id, input.saree_id)
        .await?;
    Ok(success_response(item))
}

pub async fn check_wishlisted(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(saree_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let wishlisted = state
        .services
        .wishlists
        .contains(user.user_id, saree_id)
        .await?;
    Ok(success_response(serde_json::json!({
        "wishlisted": wishlisted
    })))
}

pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(saree_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .wishlists
        .remove(user.user_id, saree_id)
        .await?;
    Ok(no_content_response())
}
