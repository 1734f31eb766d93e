pub mod addresses;
pub mod carts;
pub mod catalog;
pub mod orders;
pub mod pincodes;
pub mod reference;
pub mod stats;
pub mod stock_requests;
pub mod store_inventory;
pub mod store_sales;
pub mod users;
pub mod wishlists;

pub use addresses::AddressService;
pub use carts::CartService;
pub use catalog::CatalogService;
pub use orders::OrderService;
pub use pincodes::PincodeService;
pub use reference::ReferenceDataService;
pub use stats::StatsService;
pub use stock_requests::StockRequestService;
pub use store_inventory::StoreInventoryService;
pub use store_sales::StoreSaleService;
pub use users::UserService;
pub use wishlists::WishlistService;
