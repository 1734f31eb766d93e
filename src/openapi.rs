use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{entities, errors, handlers, services};

/// API documentation. Coverage is intentionally partial; the annotated
/// handlers are the ones integrators actually call.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Saree Commerce API",
        version = "1.0.0",
        description = "Multi-channel saree retail backend: storefront catalog and \
checkout, admin oversight, central inventory control and per-store ledgers. \
Sessions ride an http-only cookie issued by the role login endpoints."
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login_user,
        handlers::catalog::list_sarees,
        handlers::catalog::get_saree,
        handlers::catalog::check_pincode,
        handlers::cart::add_to_cart,
        handlers::orders::place_order,
        handlers::inventory::update_request_status,
        handlers::store::record_sale,
    ),
    components(schemas(
        errors::ErrorResponse,
        entities::saree::Model,
        entities::category::Model,
        entities::color::Model,
        entities::fabric::Model,
        entities::order::Model,
        entities::order_item::Model,
        entities::stock_request::Model,
        entities::store::Model,
        entities::DistributionChannel,
        entities::OrderStatus,
        entities::RequestStatus,
        entities::SaleType,
        entities::UserRole,
        handlers::auth::LoginInput,
        handlers::auth::SessionResponse,
        handlers::inventory::RequestStatusInput,
        services::carts::AddToCartInput,
        services::catalog::ChannelScope,
        services::catalog::CreateSareeInput,
        services::catalog::SortKey,
        services::orders::PlaceOrderInput,
        services::catalog::SareeDetail,
        services::pincodes::PincodeCheck,
        services::reference::CategoryInput,
        services::reference::ColorInput,
        services::reference::FabricInput,
        services::stock_requests::CreateStockRequestInput,
        services::store_sales::RecordSaleInput,
        services::store_sales::SaleItemInput,
        services::users::RegisterInput,
    )),
    tags(
        (name = "auth", description = "Registration, role logins and sessions"),
        (name = "catalog", description = "Public product browsing"),
        (name = "cart", description = "Shopper cart"),
        (name = "orders", description = "Online checkout and order history"),
        (name = "inventory", description = "Central stock control"),
        (name = "store", description = "Store-side sales and requests")
    )
)]
pub struct ApiDoc;

pub fn swagger_router() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
