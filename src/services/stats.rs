use crate::{
    entities::{
        order, saree, stock_request, store_inventory, store_sale, Order, OrderStatus,
        RequestStatus, Saree, StockRequest, StoreInventory, StoreSale, User,
    },
    errors::ServiceError,
    services::catalog::LOW_STOCK_THRESHOLD,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Read-only aggregates for the admin and store dashboards.
#[derive(Clone)]
pub struct StatsService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_sarees: u64,
    pub total_orders: u64,
    /// Revenue counts delivered orders only
    pub total_revenue: Decimal,
    pub pending_orders: u64,
    pub low_stock_items: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreStats {
    pub today_sales: u64,
    pub today_revenue: Decimal,
    pub total_inventory: i64,
    pub pending_requests: u64,
}

impl StatsService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, ServiceError> {
        let total_users = User::find().count(&*self.db).await?;
        let total_sarees = Saree::find()
            .filter(saree::Column::IsActive.eq(true))
            .count(&*self.db)
            .await?;
        let total_orders = Order::find().count(&*self.db).await?;
        let pending_orders = Order::find()
            .filter(order::Column::Status.eq(OrderStatus::Pending))
            .count(&*self.db)
            .await?;
        let low_stock_items = Saree::find()
            .filter(saree::Column::IsActive.eq(true))
            .filter(saree::Column::TotalStock.lte(LOW_STOCK_THRESHOLD))
            .count(&*self.db)
            .await?;

        let delivered_totals: Vec<Decimal> = Order::find()
            .select_only()
            .column(order::Column::TotalAmount)
            .filter(order::Column::Status.eq(OrderStatus::Delivered))
            .into_tuple()
            .all(&*self.db)
            .await?;
        let total_revenue = delivered_totals.into_iter().sum();

        Ok(AdminStats {
            total_users,
            total_sarees,
            total_orders,
            total_revenue,
            pending_orders,
            low_stock_items,
        })
    }

    pub async fn store_stats(&self, store_id: Uuid) -> Result<StoreStats, ServiceError> {
        let today_start = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();

        let today_sales = StoreSale::find()
            .filter(store_sale::Column::StoreId.eq(store_id))
            .filter(store_sale::Column::CreatedAt.gte(today_start))
            .count(&*self.db)
            .await?;

        let today_totals: Vec<Decimal> = StoreSale::find()
            .select_only()
            .column(store_sale::Column::TotalAmount)
            .filter(store_sale::Column::StoreId.eq(store_id))
            .filter(store_sale::Column::CreatedAt.gte(today_start))
            .into_tuple()
            .all(&*self.db)
            .await?;
        let today_revenue = today_totals.into_iter().sum();

        let quantities: Vec<i32> = StoreInventory::find()
            .select_only()
            .column(store_inventory::Column::Quantity)
            .filter(store_inventory::Column::StoreId.eq(store_id))
            .into_tuple()
            .all(&*self.db)
            .await?;
        let total_inventory = quantities.into_iter().map(i64::from).sum();

        let pending_requests = StockRequest::find()
            .filter(stock_request::Column::StoreId.eq(store_id))
            .filter(stock_request::Column::Status.eq(RequestStatus::Pending))
            .count(&*self.db)
            .await?;

        Ok(StoreStats {
            today_sales,
            today_revenue,
            total_inventory,
            pending_requests,
        })
    }
}
