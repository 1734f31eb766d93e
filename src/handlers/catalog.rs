use crate::{
    errors::ServiceError,
    handlers::common::{created_response, no_content_response, success_response},
    services::catalog::{ChannelScope, CreateSareeInput, SareeFilters, UpdateSareeInput},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use uuid::Uuid;

/// Public storefront routes: catalog browsing, lookups and the pincode
/// availability check.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/colors", get(list_colors))
        .route("/fabrics", get(list_fabrics))
        .route("/sarees", get(list_sarees))
        .route("/sarees/:id", get(get_saree))
        .route("/pincodes/:pincode/check", get(check_pincode))
}

#[utoipa::path(
    get,
    path = "/api/sarees",
    params(SareeFilters),
    responses((status = 200, description = "Matching sarees")),
    tag = "catalog"
)]
pub async fn list_sarees(
    State(state): State<AppState>,
    Query(mut filters): Query<SareeFilters>,
) -> Result<impl IntoResponse, ServiceError> {
    // The storefront only ever sees the online-eligible catalog; the
    // channel filter is not caller-controlled here.
    filters.channel = Some(ChannelScope::Online);
    let sarees = state.services.catalog.list_sarees(&filters, false).await?;
    Ok(success_response(sarees))
}

#[utoipa::path(
    get,
    path = "/api/sarees/{id}",
    responses(
        (status = 200, description = "Saree with its category, color and fabric"),
        (status = 404, description = "Unknown saree", body = crate::errors::ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn get_saree(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let detail = state.services.catalog.get_saree_detail(id).await?;
    Ok(success_response(detail))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.reference.list_categories().await?,
    ))
}

pub async fn list_colors(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(state.services.reference.list_colors().await?))
}

pub async fn list_fabrics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(state.services.reference.list_fabrics().await?))
}

#[utoipa::path(
    get,
    path = "/api/pincodes/{pincode}/check",
    responses((status = 200, description = "Serviceability for the pincode")),
    tag = "catalog"
)]
pub async fn check_pincode(
    State(state): State<AppState>,
    Path(pincode): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(
        state.services.pincodes.check(&pincode).await?,
    ))
}

// Catalog management handlers, shared by the admin and inventory routers.

pub async fn list_all_sarees(
    State(state): State<AppState>,
    Query(filters): Query<SareeFilters>,
) -> Result<impl IntoResponse, ServiceError> {
    let sarees = state.services.catalog.list_sarees(&filters, true).await?;
    Ok(success_response(sarees))
}

pub async fn create_saree(
    State(state): State<AppState>,
    axum::Json(input): axum::Json<CreateSareeInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let saree = state.services.catalog.create_saree(input).await?;
    Ok(created_response(saree))
}

pub async fn update_saree(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(input): axum::Json<UpdateSareeInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let saree = state.services.catalog.update_saree(id, input).await?;
    Ok(success_response(saree))
}

pub async fn delete_saree(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.catalog.delete_saree(id).await?;
    Ok(no_content_response())
}
