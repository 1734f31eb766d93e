use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "store_sale_items")]
#[schema(as = StoreSaleItem)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sale_id: Uuid,
    pub saree_id: Uuid,
    pub quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::store_sale::Entity",
        from = "Column::SaleId",
        to = "super::store_sale::Column::Id"
    )]
    Sale,
    #[sea_orm(
        belongs_to = "super::saree::Entity",
        from = "Column::SareeId",
        to = "super::saree::Column::Id"
    )]
    Saree,
}

impl Related<super::store_sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl Related<super::saree::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Saree.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
