use crate::{
    entities::{
        saree, stock_request, store, RequestStatus, Saree, SareeModel, StockRequest,
        StockRequestModel, Store, StoreModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::store_inventory::StoreInventoryService,
};
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Stock request workflow between stores and central inventory.
///
/// Lifecycle: `pending -> approved -> dispatched -> received`, with
/// `pending -> rejected` as the only branch. Marking a request `received`
/// performs the physical transfer: the central pool shrinks and the store
/// ledger grows, in one transaction.
#[derive(Clone)]
pub struct StockRequestService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStockRequestInput {
    pub saree_id: Uuid,
    #[validate(range(min = 1, max = 1000))]
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Request joined with its store and product for list views.
#[derive(Debug, Serialize, ToSchema)]
pub struct StockRequestDetail {
    #[serde(flatten)]
    pub request: StockRequestModel,
    pub store: Option<StoreModel>,
    pub saree: Option<SareeModel>,
}

impl StockRequestService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input))]
    pub async fn create_request(
        &self,
        store_id: Uuid,
        requested_by: Uuid,
        input: CreateStockRequestInput,
    ) -> Result<StockRequestModel, ServiceError> {
        input.validate()?;

        Saree::find_by_id(input.saree_id)
            .filter(saree::Column::IsActive.eq(true))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Saree {} not found", input.saree_id))
            })?;

        let now = Utc::now();
        let request = stock_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            store_id: Set(store_id),
            requested_by: Set(requested_by),
            saree_id: Set(input.saree_id),
            quantity: Set(input.quantity),
            status: Set(RequestStatus::Pending),
            approved_by: Set(None),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let request = request.insert(&*self.db).await?;
        self.event_sender
            .send_or_log(Event::StockRequestCreated(request.id))
            .await;

        info!("Created stock request {} for store {}", request.id, store_id);
        Ok(request)
    }

    pub async fn list_requests(
        &self,
        store_id: Option<Uuid>,
        status: Option<RequestStatus>,
    ) -> Result<Vec<StockRequestDetail>, ServiceError> {
        let mut query = StockRequest::find().order_by_desc(stock_request::Column::CreatedAt);
        if let Some(store_id) = store_id {
            query = query.filter(stock_request::Column::StoreId.eq(store_id));
        }
        if let Some(status) = status {
            query = query.filter(stock_request::Column::Status.eq(status));
        }

        let requests = query.all(&*self.db).await?;
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let store_ids: Vec<Uuid> = requests.iter().map(|r| r.store_id).collect();
        let saree_ids: Vec<Uuid> = requests.iter().map(|r| r.saree_id).collect();
        let stores: HashMap<Uuid, StoreModel> = Store::find()
            .filter(store::Column::Id.is_in(store_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let sarees: HashMap<Uuid, SareeModel> = Saree::find()
            .filter(saree::Column::Id.is_in(saree_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(requests
            .into_iter()
            .map(|request| StockRequestDetail {
                store: stores.get(&request.store_id).cloned(),
                saree: sarees.get(&request.saree_id).cloned(),
                request,
            })
            .collect())
    }

    /// Advances a request along its lifecycle. Illegal jumps are rejected;
    /// `received` additionally moves the stock.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        request_id: Uuid,
        new_status: RequestStatus,
        actor_id: Uuid,
    ) -> Result<StockRequestModel, ServiceError> {
        let txn = self.db.begin().await?;

        let request = StockRequest::find_by_id(request_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Stock request {} not found", request_id))
            })?;

        let old_status = request.status;
        if !old_status.can_transition_to(new_status) {
            return Err(ServiceError::InvalidOperation(format!(
                "Cannot move stock request from {} to {}",
                old_status, new_status
            )));
        }

        if new_status == RequestStatus::Received {
            // The transfer: shrink the central pool without cutting into the
            // online share, then grow the store ledger.
            let result = Saree::update_many()
                .col_expr(
                    saree::Column::TotalStock,
                    Expr::col(saree::Column::TotalStock).sub(request.quantity),
                )
                .filter(saree::Column::Id.eq(request.saree_id))
                .filter(
                    Expr::col(saree::Column::TotalStock)
                        .sub(request.quantity)
                        .gte(Expr::col(saree::Column::OnlineStock)),
                )
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                return Err(ServiceError::InsufficientStock(format!(
                    "Central stock cannot cover {} units of saree {}",
                    request.quantity, request.saree_id
                )));
            }

            StoreInventoryService::increment(
                &txn,
                request.store_id,
                request.saree_id,
                request.quantity,
            )
            .await?;
        }

        let store_id = request.store_id;
        let saree_id = request.saree_id;
        let quantity = request.quantity;

        let mut active: stock_request::ActiveModel = request.into();
        active.status = Set(new_status);
        active.updated_at = Set(Utc::now());
        if new_status == RequestStatus::Approved || new_status == RequestStatus::Rejected {
            active.approved_by = Set(Some(actor_id));
        }
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::StockRequestStatusChanged {
                request_id,
                old_status: old_status.to_string(),
                new_status: new_status.to_string(),
            })
            .await;
        if new_status == RequestStatus::Received {
            self.event_sender
                .send_or_log(Event::StockTransferred {
                    saree_id,
                    store_id,
                    quantity,
                })
                .await;
        }

        info!(
            "Stock request {} moved from {} to {}",
            request_id, old_status, new_status
        );
        Ok(updated)
    }
}
