use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product entity carrying both stock pools.
///
/// `total_stock` counts every unit held centrally; `online_stock` is the slice
/// of it reserved for web checkout. Per-store quantities live in
/// `store_inventory` and are never part of either counter.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "sarees")]
#[schema(as = Saree)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    #[sea_orm(nullable)]
    pub category_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub color_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub fabric_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub image_url: Option<String>,
    #[sea_orm(nullable, unique)]
    pub sku: Option<String>,
    pub total_stock: i32,
    pub online_stock: i32,
    pub distribution_channel: DistributionChannel,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::color::Entity",
        from = "Column::ColorId",
        to = "super::color::Column::Id"
    )]
    Color,
    #[sea_orm(
        belongs_to = "super::fabric::Entity",
        from = "Column::FabricId",
        to = "super::fabric::Column::Id"
    )]
    Fabric,
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    #[sea_orm(has_many = "super::store_inventory::Entity")]
    StoreInventory,
    #[sea_orm(has_many = "super::stock_request::Entity")]
    StockRequests,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::color::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Color.def()
    }
}

impl Related<super::fabric::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fabric.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Storefront visibility flag. Interpreted only by catalog listing: the
/// online view shows `online | both`, the shop view shows `shop | both`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, strum::Display, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DistributionChannel {
    #[sea_orm(string_value = "shop")]
    Shop,
    #[sea_orm(string_value = "online")]
    Online,
    #[sea_orm(string_value = "both")]
    Both,
}
