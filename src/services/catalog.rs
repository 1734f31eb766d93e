use crate::{
    entities::{
        saree, Category, CategoryModel, Color, ColorModel, DistributionChannel, Fabric,
        FabricModel, Saree, SareeModel, StoreInventory,
    },
    errors::ServiceError,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Sarees with total stock at or below this count show up on the low stock
/// report.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

const DEFAULT_LIST_LIMIT: u64 = 100;
const MAX_LIST_LIMIT: u64 = 500;

/// Catalog service managing the saree product catalog and the central stock
/// pool.
///
/// Stock invariant maintained on every write: `0 <= online_stock <=
/// total_stock`. `total_stock` counts every unit held centrally;
/// `online_stock` is the portion sellable through the online channel.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

/// Which sales channel a catalog listing should be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChannelScope {
    Online,
    Shop,
}

/// Sort orders for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Newest,
    PriceLow,
    PriceHigh,
    Name,
}

/// Catalog listing filters, deserialized straight from the query string.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
pub struct SareeFilters {
    /// Substring match on name or description
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub fabric_id: Option<Uuid>,
    pub featured: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub channel: Option<ChannelScope>,
    pub sort: Option<SortKey>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSareeInput {
    #[validate(length(min = 2, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub fabric_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    #[serde(default)]
    pub total_stock: i32,
    #[serde(default)]
    pub online_stock: i32,
    pub distribution_channel: DistributionChannel,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSareeInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub fabric_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub total_stock: Option<i32>,
    pub online_stock: Option<i32>,
    pub distribution_channel: Option<DistributionChannel>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

/// Saree together with its reference rows, for the product page.
#[derive(Debug, Serialize, ToSchema)]
pub struct SareeDetail {
    #[serde(flatten)]
    pub saree: SareeModel,
    pub category: Option<CategoryModel>,
    pub color: Option<ColorModel>,
    pub fabric: Option<FabricModel>,
}

/// Per-product view of how stock is spread across channels and stores.
#[derive(Debug, Serialize, ToSchema)]
pub struct StockDistributionRow {
    pub saree_id: Uuid,
    pub name: String,
    pub total_stock: i32,
    pub online_stock: i32,
    pub store_stock: i64,
}

fn check_stock_bounds(total: i32, online: i32) -> Result<(), ServiceError> {
    if total < 0 || online < 0 {
        return Err(ServiceError::ValidationError(
            "Stock counts cannot be negative".to_string(),
        ));
    }
    if online > total {
        return Err(ServiceError::ValidationError(
            "Online stock cannot exceed total stock".to_string(),
        ));
    }
    Ok(())
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists sarees matching the given filters. Public listings only see
    /// active products; admin and inventory surfaces pass
    /// `include_inactive = true`.
    #[instrument(skip(self))]
    pub async fn list_sarees(
        &self,
        filters: &SareeFilters,
        include_inactive: bool,
    ) -> Result<Vec<SareeModel>, ServiceError> {
        let mut query = Saree::find();

        if !include_inactive {
            query = query.filter(saree::Column::IsActive.eq(true));
        }

        if let Some(search) = filters.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(saree::Column::Name.contains(search))
                    .add(saree::Column::Description.contains(search)),
            );
        }
        if let Some(category_id) = filters.category_id {
            query = query.filter(saree::Column::CategoryId.eq(category_id));
        }
        if let Some(color_id) = filters.color_id {
            query = query.filter(saree::Column::ColorId.eq(color_id));
        }
        if let Some(fabric_id) = filters.fabric_id {
            query = query.filter(saree::Column::FabricId.eq(fabric_id));
        }
        if let Some(featured) = filters.featured {
            query = query.filter(saree::Column::IsFeatured.eq(featured));
        }
        if let Some(min) = filters.min_price {
            query = query.filter(saree::Column::Price.gte(min));
        }
        if let Some(max) = filters.max_price {
            query = query.filter(saree::Column::Price.lte(max));
        }
        if let Some(scope) = filters.channel {
            // "both" products are visible from either channel
            let channels = match scope {
                ChannelScope::Online => {
                    vec![DistributionChannel::Online, DistributionChannel::Both]
                }
                ChannelScope::Shop => vec![DistributionChannel::Shop, DistributionChannel::Both],
            };
            query = query.filter(saree::Column::DistributionChannel.is_in(channels));
        }

        query = match filters.sort.unwrap_or(SortKey::Newest) {
            SortKey::Newest => query.order_by_desc(saree::Column::CreatedAt),
            SortKey::PriceLow => query.order_by_asc(saree::Column::Price),
            SortKey::PriceHigh => query.order_by_desc(saree::Column::Price),
            SortKey::Name => query.order_by_asc(saree::Column::Name),
        };

        let limit = filters
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .min(MAX_LIST_LIMIT);

        Ok(query.limit(limit).all(&*self.db).await?)
    }

    pub async fn get_saree(&self, id: Uuid) -> Result<SareeModel, ServiceError> {
        Saree::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Saree {} not found", id)))
    }

    /// Fetch-by-id with the joined category, color and fabric rows.
    pub async fn get_saree_detail(&self, id: Uuid) -> Result<SareeDetail, ServiceError> {
        let saree = self.get_saree(id).await?;

        let category = match saree.category_id {
            Some(category_id) => Category::find_by_id(category_id).one(&*self.db).await?,
            None => None,
        };
        let color = match saree.color_id {
            Some(color_id) => Color::find_by_id(color_id).one(&*self.db).await?,
            None => None,
        };
        let fabric = match saree.fabric_id {
            Some(fabric_id) => Fabric::find_by_id(fabric_id).one(&*self.db).await?,
            None => None,
        };

        Ok(SareeDetail {
            saree,
            category,
            color,
            fabric,
        })
    }

    #[instrument(skip(self, input))]
    pub async fn create_saree(&self, input: CreateSareeInput) -> Result<SareeModel, ServiceError> {
        input.validate()?;
        check_stock_bounds(input.total_stock, input.online_stock)?;
        if input.price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Price cannot be negative".to_string(),
            ));
        }

        let saree = saree::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            category_id: Set(input.category_id),
            color_id: Set(input.color_id),
            fabric_id: Set(input.fabric_id),
            image_url: Set(input.image_url),
            sku: Set(input.sku),
            total_stock: Set(input.total_stock),
            online_stock: Set(input.online_stock),
            distribution_channel: Set(input.distribution_channel),
            is_active: Set(true),
            is_featured: Set(input.is_featured),
            created_at: Set(Utc::now()),
        };

        let saree = saree.insert(&*self.db).await?;
        info!("Created saree {}", saree.id);
        Ok(saree)
    }

    /// Applies a partial update. Stock bounds are checked against the values
    /// the row would hold after the update.
    #[instrument(skip(self, input))]
    pub async fn update_saree(
        &self,
        id: Uuid,
        input: UpdateSareeInput,
    ) -> Result<SareeModel, ServiceError> {
        let existing = self.get_saree(id).await?;

        let total = input.total_stock.unwrap_or(existing.total_stock);
        let online = input.online_stock.unwrap_or(existing.online_stock);
        check_stock_bounds(total, online)?;

        if let Some(price) = input.price {
            if price < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Price cannot be negative".to_string(),
                ));
            }
        }

        let mut active: saree::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(Some(category_id));
        }
        if let Some(color_id) = input.color_id {
            active.color_id = Set(Some(color_id));
        }
        if let Some(fabric_id) = input.fabric_id {
            active.fabric_id = Set(Some(fabric_id));
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(sku) = input.sku {
            active.sku = Set(Some(sku));
        }
        if let Some(total_stock) = input.total_stock {
            active.total_stock = Set(total_stock);
        }
        if let Some(online_stock) = input.online_stock {
            active.online_stock = Set(online_stock);
        }
        if let Some(channel) = input.distribution_channel {
            active.distribution_channel = Set(channel);
        }
        if let Some(is_featured) = input.is_featured {
            active.is_featured = Set(is_featured);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        Ok(active.update(&*self.db).await?)
    }

    /// Soft delete. The row stays behind order items and sale lines that
    /// reference it.
    #[instrument(skip(self))]
    pub async fn delete_saree(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get_saree(id).await?;
        let mut active: saree::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.update(&*self.db).await?;
        info!("Deactivated saree {}", id);
        Ok(())
    }

    /// Sets the stock counters directly. Used by the inventory surface.
    #[instrument(skip(self))]
    pub async fn set_stock(
        &self,
        id: Uuid,
        total_stock: i32,
        online_stock: i32,
    ) -> Result<SareeModel, ServiceError> {
        check_stock_bounds(total_stock, online_stock)?;
        let existing = self.get_saree(id).await?;
        let mut active: saree::ActiveModel = existing.into();
        active.total_stock = Set(total_stock);
        active.online_stock = Set(online_stock);
        Ok(active.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn set_distribution_channel(
        &self,
        id: Uuid,
        channel: DistributionChannel,
    ) -> Result<SareeModel, ServiceError> {
        let existing = self.get_saree(id).await?;
        let mut active: saree::ActiveModel = existing.into();
        active.distribution_channel = Set(channel);
        Ok(active.update(&*self.db).await?)
    }

    /// Active sarees whose total stock has fallen to the threshold or below,
    /// lowest first.
    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<SareeModel>, ServiceError> {
        Ok(Saree::find()
            .filter(saree::Column::IsActive.eq(true))
            .filter(saree::Column::TotalStock.lte(threshold))
            .order_by_asc(saree::Column::TotalStock)
            .all(&*self.db)
            .await?)
    }

    /// Stock spread per product: central pool, online share, and the units
    /// already transferred out to stores.
    pub async fn stock_distribution(&self) -> Result<Vec<StockDistributionRow>, ServiceError> {
        let sarees = Saree::find()
            .filter(saree::Column::IsActive.eq(true))
            .order_by_asc(saree::Column::Name)
            .all(&*self.db)
            .await?;

        let mut store_totals: HashMap<Uuid, i64> = HashMap::new();
        for row in StoreInventory::find().all(&*self.db).await? {
            *store_totals.entry(row.saree_id).or_insert(0) += row.quantity as i64;
        }

        Ok(sarees
            .into_iter()
            .map(|s| StockDistributionRow {
                store_stock: store_totals.get(&s.id).copied().unwrap_or(0),
                saree_id: s.id,
                name: s.name,
                total_stock: s.total_stock,
                online_stock: s.online_stock,
            })
            .collect())
    }
}
