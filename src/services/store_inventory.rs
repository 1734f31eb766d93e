use crate::{
    entities::{saree, store_inventory, DistributionChannel, Saree, SareeModel, StoreInventory},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-store stock ledger. One row per (store, saree); rows are created on
/// the first transfer in.
#[derive(Clone)]
pub struct StoreInventoryService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreInventoryLine {
    pub id: Uuid,
    pub quantity: i32,
    pub saree: SareeModel,
}

/// Shop-channel product together with how many units the store holds.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreProduct {
    #[serde(flatten)]
    pub saree: SareeModel,
    pub on_hand: i32,
}

impl StoreInventoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn list_for_store(
        &self,
        store_id: Uuid,
    ) -> Result<Vec<StoreInventoryLine>, ServiceError> {
        let rows = StoreInventory::find()
            .filter(store_inventory::Column::StoreId.eq(store_id))
            .find_also_related(Saree)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(row, saree)| {
                saree.map(|saree| StoreInventoryLine {
                    id: row.id,
                    quantity: row.quantity,
                    saree,
                })
            })
            .collect())
    }

    /// Every active shop-channel product, annotated with the units this
    /// store currently holds. Products the store has never stocked show
    /// zero.
    pub async fn shop_products(&self, store_id: Uuid) -> Result<Vec<StoreProduct>, ServiceError> {
        let sarees = Saree::find()
            .filter(saree::Column::IsActive.eq(true))
            .filter(saree::Column::DistributionChannel.is_in([
                DistributionChannel::Shop,
                DistributionChannel::Both,
            ]))
            .order_by_asc(saree::Column::Name)
            .all(&*self.db)
            .await?;

        let mut held: HashMap<Uuid, i32> = HashMap::new();
        for row in StoreInventory::find()
            .filter(store_inventory::Column::StoreId.eq(store_id))
            .all(&*self.db)
            .await?
        {
            held.insert(row.saree_id, row.quantity);
        }

        Ok(sarees
            .into_iter()
            .map(|s| StoreProduct {
                on_hand: held.get(&s.id).copied().unwrap_or(0),
                saree: s,
            })
            .collect())
    }

    /// Adds units to a store's ledger, creating the row when the store has
    /// never held this product. Callers run this inside their own
    /// transaction.
    #[instrument(skip(conn))]
    pub async fn increment<C: ConnectionTrait>(
        conn: &C,
        store_id: Uuid,
        saree_id: Uuid,
        quantity: i32,
    ) -> Result<(), ServiceError> {
        let result = StoreInventory::update_many()
            .col_expr(
                store_inventory::Column::Quantity,
                Expr::col(store_inventory::Column::Quantity).add(quantity),
            )
            .col_expr(
                store_inventory::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(store_inventory::Column::StoreId.eq(store_id))
            .filter(store_inventory::Column::SareeId.eq(saree_id))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            let row = store_inventory::ActiveModel {
                id: Set(Uuid::new_v4()),
                store_id: Set(store_id),
                saree_id: Set(saree_id),
                quantity: Set(quantity),
                updated_at: Set(Utc::now()),
            };
            row.insert(conn).await?;
        }

        Ok(())
    }

    /// Removes units from a store's ledger. The decrement is conditional on
    /// the row still holding enough stock; a shortfall surfaces as
    /// `InsufficientStock`.
    pub async fn decrement<C: ConnectionTrait>(
        conn: &C,
        store_id: Uuid,
        saree_id: Uuid,
        quantity: i32,
    ) -> Result<(), ServiceError> {
        let result = StoreInventory::update_many()
            .col_expr(
                store_inventory::Column::Quantity,
                Expr::col(store_inventory::Column::Quantity).sub(quantity),
            )
            .col_expr(
                store_inventory::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(store_inventory::Column::StoreId.eq(store_id))
            .filter(store_inventory::Column::SareeId.eq(saree_id))
            .filter(store_inventory::Column::Quantity.gte(quantity))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::InsufficientStock(format!(
                "Store {} does not hold {} units of saree {}",
                store_id, quantity, saree_id
            )));
        }

        Ok(())
    }
}
