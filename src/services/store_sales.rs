use crate::{
    entities::{
        store_sale, store_sale_item, SaleType, Saree, SareeModel, StoreSale, StoreSaleItem,
        StoreSaleModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::store_inventory::StoreInventoryService,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Walk-in and reserved sales at a physical store.
///
/// Each sale decrements the store's own ledger, never the central pool;
/// the decrements are conditional so a sale cannot take more than the
/// store holds. Sale, lines and decrements commit in one transaction.
#[derive(Clone)]
pub struct StoreSaleService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

/// One sale line. The price is what the counter actually charged, which
/// may differ from the catalog price after in-store discounts.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaleItemInput {
    pub saree_id: Uuid,
    #[validate(range(min = 1, max = 100))]
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordSaleInput {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    #[serde(default = "default_sale_type")]
    pub sale_type: SaleType,
    #[validate]
    pub items: Vec<SaleItemInput>,
}

fn default_sale_type() -> SaleType {
    SaleType::WalkIn
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleLine {
    pub id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub saree: Option<SareeModel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreSaleDetail {
    #[serde(flatten)]
    pub sale: StoreSaleModel,
    pub items: Vec<SaleLine>,
}

impl StoreSaleService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Records a sale against the store's ledger.
    #[instrument(skip(self, input))]
    pub async fn record_sale(
        &self,
        store_id: Uuid,
        sold_by: Uuid,
        input: RecordSaleInput,
    ) -> Result<StoreSaleModel, ServiceError> {
        input.validate()?;
        if input.items.is_empty() {
            return Err(ServiceError::InvalidOperation(
                "A sale needs at least one item".to_string(),
            ));
        }

        for item in &input.items {
            if item.price < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Sale price cannot be negative".to_string(),
                ));
            }
        }

        let txn = self.db.begin().await?;

        let mut lines: Vec<(SareeModel, i32, Decimal)> = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let saree = Saree::find_by_id(item.saree_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Saree {} not found", item.saree_id))
                })?;
            lines.push((saree, item.quantity, item.price));
        }

        let total_amount: Decimal = lines
            .iter()
            .map(|(_, qty, price)| *price * Decimal::from(*qty))
            .sum();

        let sale_id = Uuid::new_v4();
        let sale = store_sale::ActiveModel {
            id: Set(sale_id),
            store_id: Set(store_id),
            sold_by: Set(sold_by),
            customer_name: Set(input.customer_name),
            customer_phone: Set(input.customer_phone),
            total_amount: Set(total_amount),
            sale_type: Set(input.sale_type),
            created_at: Set(Utc::now()),
        };
        let sale = sale.insert(&txn).await?;

        for (saree, quantity, price) in &lines {
            StoreInventoryService::decrement(&txn, store_id, saree.id, *quantity).await?;

            let line = store_sale_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                sale_id: Set(sale_id),
                saree_id: Set(saree.id),
                quantity: Set(*quantity),
                price: Set(*price),
            };
            line.insert(&txn).await?;
        }

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::StoreSaleRecorded { sale_id, store_id })
            .await;

        info!("Recorded sale {} at store {}", sale_id, store_id);
        Ok(sale)
    }

    pub async fn list_sales(
        &self,
        store_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<StoreSaleDetail>, ServiceError> {
        let mut query = StoreSale::find()
            .filter(store_sale::Column::StoreId.eq(store_id))
            .order_by_desc(store_sale::Column::CreatedAt);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let sales = query.all(&*self.db).await?;
        let mut details = Vec::with_capacity(sales.len());
        for sale in sales {
            let items = StoreSaleItem::find()
                .filter(store_sale_item::Column::SaleId.eq(sale.id))
                .find_also_related(Saree)
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|(item, saree)| SaleLine {
                    id: item.id,
                    quantity: item.quantity,
                    price: item.price,
                    saree,
                })
                .collect();
            details.push(StoreSaleDetail { sale, items });
        }
        Ok(details)
    }
}
