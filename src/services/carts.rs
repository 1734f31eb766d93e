use crate::{
    entities::{cart_item, saree, CartItem, Saree, SareeModel},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Per-shopper cart. One row per (user, saree); adding an item already in
/// the cart merges quantities.
#[derive(Clone)]
pub struct CartService {
    db: Arc<DatabaseConnection>,
}

/// Cart row joined with its product.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartLine {
    pub id: Uuid,
    pub quantity: i32,
    pub saree: SareeModel,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddToCartInput {
    pub saree_id: Uuid,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

impl CartService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn get_cart(&self, user_id: Uuid) -> Result<Vec<CartLine>, ServiceError> {
        let rows = CartItem::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .order_by_desc(cart_item::Column::CreatedAt)
            .find_also_related(Saree)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(item, saree)| {
                saree.map(|saree| CartLine {
                    id: item.id,
                    quantity: item.quantity,
                    saree,
                })
            })
            .collect())
    }

    /// Number of cart rows, one per distinct product.
    pub async fn count(&self, user_id: Uuid) -> Result<u64, ServiceError> {
        Ok(CartItem::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .count(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        user_id: Uuid,
        input: AddToCartInput,
    ) -> Result<CartLine, ServiceError> {
        input.validate()?;

        let saree = Saree::find_by_id(input.saree_id)
            .filter(saree::Column::IsActive.eq(true))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Saree {} not found", input.saree_id))
            })?;

        let existing = CartItem::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .filter(cart_item::Column::SareeId.eq(input.saree_id))
            .one(&*self.db)
            .await?;

        let item = match existing {
            Some(item) => {
                let merged = item.quantity + input.quantity;
                let mut active: cart_item::ActiveModel = item.into();
                active.quantity = Set(merged);
                active.update(&*self.db).await?
            }
            None => {
                let active = cart_item::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    saree_id: Set(input.saree_id),
                    quantity: Set(input.quantity),
                    created_at: Set(Utc::now()),
                };
                active.insert(&*self.db).await?
            }
        };

        info!("Cart updated for user {}", user_id);
        Ok(CartLine {
            id: item.id,
            quantity: item.quantity,
            saree,
        })
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<(), ServiceError> {
        if !(1..=100).contains(&quantity) {
            return Err(ServiceError::ValidationError(
                "Quantity must be between 1 and 100".to_string(),
            ));
        }

        let item = CartItem::find_by_id(item_id)
            .filter(cart_item::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cart item {} not found", item_id)))?;

        let mut active: cart_item::ActiveModel = item.into();
        active.quantity = Set(quantity);
        active.update(&*self.db).await?;
        Ok(())
    }

    /// Empties the cart. Also used after a successful checkout.
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: Uuid) -> Result<(), ServiceError> {
        CartItem::delete_many()
            .filter(cart_item::Column::UserId.eq(user_id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: Uuid, item_id: Uuid) -> Result<(), ServiceError> {
        let item = CartItem::find_by_id(item_id)
            .filter(cart_item::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cart item {} not found", item_id)))?;

        item.delete(&*self.db).await?;
        Ok(())
    }
}
