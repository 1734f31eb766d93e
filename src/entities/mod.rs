//! Database entities for the saree platform.

pub mod cart_item;
pub mod category;
pub mod color;
pub mod fabric;
pub mod order;
pub mod order_item;
pub mod saree;
pub mod serviceable_pincode;
pub mod stock_request;
pub mod store;
pub mod store_inventory;
pub mod store_sale;
pub mod store_sale_item;
pub mod user;
pub mod user_address;
pub mod wishlist_item;

// Re-export entities
pub use cart_item::{Entity as CartItem, Model as CartItemModel};
pub use category::{Entity as Category, Model as CategoryModel};
pub use color::{Entity as Color, Model as ColorModel};
pub use fabric::{Entity as Fabric, Model as FabricModel};
pub use order::{Entity as Order, Model as OrderModel, OrderStatus};
pub use order_item::{Entity as OrderItem, Model as OrderItemModel};
pub use saree::{DistributionChannel, Entity as Saree, Model as SareeModel};
pub use serviceable_pincode::{Entity as ServiceablePincode, Model as ServiceablePincodeModel};
pub use stock_request::{Entity as StockRequest, Model as StockRequestModel, RequestStatus};
pub use store::{Entity as Store, Model as StoreModel};
pub use store_inventory::{Entity as StoreInventory, Model as StoreInventoryModel};
pub use store_sale::{Entity as StoreSale, Model as StoreSaleModel, SaleType};
pub use store_sale_item::{Entity as StoreSaleItem, Model as StoreSaleItemModel};
pub use user::{Entity as User, Model as UserModel, UserRole};
pub use user_address::{Entity as UserAddress, Model as UserAddressModel};
pub use wishlist_item::{Entity as WishlistItem, Model as WishlistItemModel};
