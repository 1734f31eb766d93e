use crate::{
    entities::{saree, wishlist_item, Saree, SareeModel, WishlistItem, WishlistItemModel},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-shopper wishlist. Adding is idempotent; one row per (user, saree).
#[derive(Clone)]
pub struct WishlistService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistLine {
    pub id: Uuid,
    pub saree: SareeModel,
}

impl WishlistService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn get_wishlist(&self, user_id: Uuid) -> Result<Vec<WishlistLine>, ServiceError> {
        let rows = WishlistItem::find()
            .filter(wishlist_item::Column::UserId.eq(user_id))
            .order_by_desc(wishlist_item::Column::CreatedAt)
            .find_also_related(Saree)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(item, saree)| saree.map(|saree| WishlistLine { id: item.id, saree }))
            .collect())
    }

    pub async fn count(&self, user_id: Uuid) -> Result<u64, ServiceError> {
        Ok(WishlistItem::find()
            .filter(wishlist_item::Column::UserId.eq(user_id))
            .count(&*self.db)
            .await?)
    }

    pub async fn contains(&self, user_id: Uuid, saree_id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.find_entry(user_id, saree_id).await?.is_some())
    }

    #[instrument(skip(self))]
    pub async fn add(
        &self,
        user_id: Uuid,
        saree_id: Uuid,
    ) -> Result<WishlistItemModel, ServiceError> {
        Saree::find_by_id(saree_id)
            .filter(saree::Column::IsActive.eq(true))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Saree {} not found", saree_id)))?;

        if let Some(existing) = self.find_entry(user_id, saree_id).await? {
            return Ok(existing);
        }

        let active = wishlist_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            saree_id: Set(saree_id),
            created_at: Set(Utc::now()),
        };
        Ok(active.insert(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: Uuid, saree_id: Uuid) -> Result<(), ServiceError> {
        let item = self.find_entry(user_id, saree_id).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Saree {} is not in the wishlist", saree_id))
        })?;

        item.delete(&*self.db).await?;
        Ok(())
    }

    async fn find_entry(
        &self,
        user_id: Uuid,
        saree_id: Uuid,
    ) -> Result<Option<WishlistItemModel>, ServiceError> {
        Ok(WishlistItem::find()
            .filter(wishlist_item::Column::UserId.eq(user_id))
            .filter(wishlist_item::Column::SareeId.eq(saree_id))
            .one(&*self.db)
            .await?)
    }
}
