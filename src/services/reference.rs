use crate::{
    entities::{
        category, color, fabric, store, Category, CategoryModel, Color, ColorModel, Fabric,
        FabricModel, Store, StoreModel,
    },
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Reference data: categories, colors and fabrics for the catalog, plus the
/// physical stores. All deletes are soft so existing sarees keep their
/// references.
#[derive(Clone)]
pub struct ReferenceDataService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ColorInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 4, max = 9))]
    pub hex_code: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FabricInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStoreInput {
    #[validate(length(min = 2, max = 200))]
    pub name: String,
    #[validate(length(min = 5, max = 500))]
    pub address: String,
    pub phone: Option<String>,
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStoreInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub manager_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl ReferenceDataService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // Categories

    pub async fn list_categories(&self) -> Result<Vec<CategoryModel>, ServiceError> {
        Ok(Category::find()
            .filter(category::Column::IsActive.eq(true))
            .order_by_asc(category::Column::Name)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create_category(
        &self,
        input: CategoryInput,
    ) -> Result<CategoryModel, ServiceError> {
        input.validate()?;
        let taken = Category::find()
            .filter(category::Column::Name.eq(input.name.clone()))
            .one(&*self.db)
            .await?;
        if taken.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Category '{}' already exists",
                input.name
            )));
        }
        let model = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            image_url: Set(input.image_url),
            is_active: Set(true),
        };
        let created = model.insert(&*self.db).await?;
        info!("Created category {}", created.id);
        Ok(created)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<CategoryModel, ServiceError> {
        input.validate()?;
        let existing = Category::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;
        let mut active: category::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.description = Set(input.description);
        active.image_url = Set(input.image_url);
        Ok(active.update(&*self.db).await?)
    }

    /// Soft delete. Sarees referencing the category keep their link.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = Category::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;
        let mut active: category::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.update(&*self.db).await?;
        Ok(())
    }

    // Colors

    pub async fn list_colors(&self) -> Result<Vec<ColorModel>, ServiceError> {
        Ok(Color::find()
            .filter(color::Column::IsActive.eq(true))
            .order_by_asc(color::Column::Name)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create_color(&self, input: ColorInput) -> Result<ColorModel, ServiceError> {
        input.validate()?;
        let taken = Color::find()
            .filter(color::Column::Name.eq(input.name.clone()))
            .one(&*self.db)
            .await?;
        if taken.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Color '{}' already exists",
                input.name
            )));
        }
        let model = color::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            hex_code: Set(input.hex_code),
            is_active: Set(true),
        };
        Ok(model.insert(&*self.db).await?)
    }

    pub async fn update_color(
        &self,
        id: Uuid,
        input: ColorInput,
    ) -> Result<ColorModel, ServiceError> {
        input.validate()?;
        let existing = Color::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Color {} not found", id)))?;
        let mut active: color::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.hex_code = Set(input.hex_code);
        Ok(active.update(&*self.db).await?)
    }

    pub async fn delete_color(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = Color::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Color {} not found", id)))?;
        let mut active: color::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.update(&*self.db).await?;
        Ok(())
    }

    // Fabrics

    pub async fn list_fabrics(&self) -> Result<Vec<FabricModel>, ServiceError> {
        Ok(Fabric::find()
            .filter(fabric::Column::IsActive.eq(true))
            .order_by_asc(fabric::Column::Name)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create_fabric(&self, input: FabricInput) -> Result<FabricModel, ServiceError> {
        input.validate()?;
        let taken = Fabric::find()
            .filter(fabric::Column::Name.eq(input.name.clone()))
            .one(&*self.db)
            .await?;
        if taken.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Fabric '{}' already exists",
                input.name
            )));
        }
        let model = fabric::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            is_active: Set(true),
        };
        Ok(model.insert(&*self.db).await?)
    }

    pub async fn update_fabric(
        &self,
        id: Uuid,
        input: FabricInput,
    ) -> Result<FabricModel, ServiceError> {
        input.validate()?;
        let existing = Fabric::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Fabric {} not found", id)))?;
        let mut active: fabric::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.description = Set(input.description);
        Ok(active.update(&*self.db).await?)
    }

    pub async fn delete_fabric(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = Fabric::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Fabric {} not found", id)))?;
        let mut active: fabric::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.update(&*self.db).await?;
        Ok(())
    }

    // Stores

    pub async fn list_stores(&self) -> Result<Vec<StoreModel>, ServiceError> {
        Ok(Store::find()
            .filter(store::Column::IsActive.eq(true))
            .order_by_asc(store::Column::Name)
            .all(&*self.db)
            .await?)
    }

    pub async fn get_store(&self, id: Uuid) -> Result<StoreModel, ServiceError> {
        Store::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Store {} not found", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn create_store(&self, input: CreateStoreInput) -> Result<StoreModel, ServiceError> {
        input.validate()?;
        let model = store::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            address: Set(input.address),
            phone: Set(input.phone),
            manager_id: Set(input.manager_id),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };
        let created = model.insert(&*self.db).await?;
        info!("Created store {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_store(
        &self,
        id: Uuid,
        input: UpdateStoreInput,
    ) -> Result<StoreModel, ServiceError> {
        let existing = self.get_store(id).await?;
        let mut active: store::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if input.phone.is_some() {
            active.phone = Set(input.phone);
        }
        if input.manager_id.is_some() {
            active.manager_id = Set(input.manager_id);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        Ok(active.update(&*self.db).await?)
    }
}
