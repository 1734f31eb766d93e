use crate::{
    entities::{
        cart_item, order, order_item, saree, CartItem, Order, OrderItem, OrderModel, OrderStatus,
        Saree, SareeModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Order service for the online channel.
///
/// Placing an order happens in a single transaction: the order row, its
/// items, the guarded `online_stock` decrements and the cart clear all
/// commit together or not at all. Oversell is blocked by a conditional
/// decrement, so two concurrent checkouts cannot both take the last unit.
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PlaceOrderInput {
    #[validate(length(min = 10, max = 500))]
    pub shipping_address: String,
    #[validate(length(min = 10, max = 15))]
    pub phone: String,
    pub notes: Option<String>,
}

/// Order line joined with its product. The saree may be gone from the
/// catalog; the line keeps its snapshot price either way.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLine {
    pub id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub saree: Option<SareeModel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderModel,
    pub items: Vec<OrderLine>,
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Converts the shopper's cart into an order.
    ///
    /// Fails with `InvalidOperation` on an empty cart and
    /// `InsufficientStock` when any line cannot be covered by the online
    /// pool. Totals are computed from current catalog prices, captured on
    /// each order line.
    #[instrument(skip(self, input))]
    pub async fn place_order(
        &self,
        user_id: Uuid,
        input: PlaceOrderInput,
    ) -> Result<OrderModel, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let cart_rows = CartItem::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .find_also_related(Saree)
            .all(&txn)
            .await?;

        if cart_rows.is_empty() {
            return Err(ServiceError::InvalidOperation("Cart is empty".to_string()));
        }

        let mut lines: Vec<(SareeModel, i32)> = Vec::with_capacity(cart_rows.len());
        for (item, maybe_saree) in cart_rows {
            let saree = maybe_saree.filter(|s| s.is_active).ok_or_else(|| {
                ServiceError::InvalidOperation(format!(
                    "Saree {} is no longer available",
                    item.saree_id
                ))
            })?;
            lines.push((saree, item.quantity));
        }

        let total_amount: Decimal = lines
            .iter()
            .map(|(saree, qty)| saree.price * Decimal::from(*qty))
            .sum();

        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let order_row = order::ActiveModel {
            id: Set(order_id),
            user_id: Set(user_id),
            total_amount: Set(total_amount),
            status: Set(OrderStatus::Pending),
            shipping_address: Set(input.shipping_address),
            phone: Set(input.phone),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let order_row = order_row.insert(&txn).await?;

        for (saree, quantity) in &lines {
            // Conditional decrement: only succeeds while enough online
            // stock remains, so concurrent orders cannot oversell.
            let result = Saree::update_many()
                .col_expr(
                    saree::Column::OnlineStock,
                    Expr::col(saree::Column::OnlineStock).sub(*quantity),
                )
                .filter(saree::Column::Id.eq(saree.id))
                .filter(saree::Column::OnlineStock.gte(*quantity))
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                return Err(ServiceError::InsufficientStock(format!(
                    "Not enough online stock for {}",
                    saree.name
                )));
            }

            let item = order_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order_id),
                saree_id: Set(saree.id),
                quantity: Set(*quantity),
                price: Set(saree.price),
            };
            item.insert(&txn).await?;
        }

        CartItem::delete_many()
            .filter(cart_item::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        self.event_sender.send_or_log(Event::OrderCreated(order_id)).await;

        info!("Placed order {} for user {}", order_id, user_id);
        Ok(order_row)
    }

    /// Order history for one shopper, each order carrying its lines.
    pub async fn get_orders(&self, user_id: Uuid) -> Result<Vec<OrderDetail>, ServiceError> {
        let orders = Order::find()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_desc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let mut lines_by_order: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
        let rows = OrderItem::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .find_also_related(Saree)
            .all(&*self.db)
            .await?;
        for (item, saree) in rows {
            lines_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderLine {
                    id: item.id,
                    quantity: item.quantity,
                    price: item.price,
                    saree,
                });
        }

        Ok(orders
            .into_iter()
            .map(|order_row| OrderDetail {
                items: lines_by_order.remove(&order_row.id).unwrap_or_default(),
                order: order_row,
            })
            .collect())
    }

    /// Loads one order with its lines. When `user_id` is given the order
    /// must belong to that shopper.
    pub async fn get_order(
        &self,
        order_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<OrderDetail, ServiceError> {
        let mut query = Order::find_by_id(order_id);
        if let Some(user_id) = user_id {
            query = query.filter(order::Column::UserId.eq(user_id));
        }

        let order_row = query
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        let items = OrderItem::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .find_also_related(Saree)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|(item, saree)| OrderLine {
                id: item.id,
                quantity: item.quantity,
                price: item.price,
                saree,
            })
            .collect();

        Ok(OrderDetail {
            order: order_row,
            items,
        })
    }

    pub async fn list_all(
        &self,
        status: Option<OrderStatus>,
        limit: Option<u64>,
    ) -> Result<Vec<OrderModel>, ServiceError> {
        let mut query = Order::find().order_by_desc(order::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(order::Column::Status.eq(status));
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&*self.db).await?)
    }

    /// Moves an order to a new status. Any target state is allowed;
    /// cancelling does not restock the online pool.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<OrderModel, ServiceError> {
        let order_row = Order::find_by_id(order_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        let old_status = order_row.status;
        let mut active: order::ActiveModel = order_row.into();
        active.status = Set(new_status);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::OrderStatusChanged {
                order_id,
                old_status: old_status.to_string(),
                new_status: new_status.to_string(),
            })
            .await;

        Ok(updated)
    }
}
