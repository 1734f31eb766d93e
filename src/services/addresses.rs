use crate::{
    entities::{user_address, UserAddress, UserAddressModel},
    errors::ServiceError,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());
static PINCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());

/// Saved delivery addresses. At most one default per shopper.
#[derive(Clone)]
pub struct AddressService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddressInput {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(regex = "PHONE_RE")]
    pub phone: String,
    #[validate(length(min = 5, max = 200))]
    pub locality: String,
    #[validate(length(min = 2, max = 100))]
    pub city: String,
    #[validate(regex = "PINCODE_RE")]
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

impl AddressService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<UserAddressModel>, ServiceError> {
        Ok(UserAddress::find()
            .filter(user_address::Column::UserId.eq(user_id))
            .order_by_desc(user_address::Column::IsDefault)
            .order_by_desc(user_address::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        user_id: Uuid,
        input: AddressInput,
    ) -> Result<UserAddressModel, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        if input.is_default {
            self.clear_default(&txn, user_id).await?;
        }

        let model = user_address::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name),
            phone: Set(input.phone),
            locality: Set(input.locality),
            city: Set(input.city),
            pincode: Set(input.pincode),
            is_default: Set(input.is_default),
            created_at: Set(Utc::now()),
        };
        let created = model.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        user_id: Uuid,
        address_id: Uuid,
        input: AddressInput,
    ) -> Result<UserAddressModel, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let existing = self.owned(&txn, user_id, address_id).await?;

        if input.is_default && !existing.is_default {
            self.clear_default(&txn, user_id).await?;
        }

        let mut active: user_address::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.phone = Set(input.phone);
        active.locality = Set(input.locality);
        active.city = Set(input.city);
        active.pincode = Set(input.pincode);
        active.is_default = Set(input.is_default);
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Makes one address the default, demoting any other.
    #[instrument(skip(self))]
    pub async fn set_default(
        &self,
        user_id: Uuid,
        address_id: Uuid,
    ) -> Result<UserAddressModel, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = self.owned(&txn, user_id, address_id).await?;

        self.clear_default(&txn, user_id).await?;
        let mut active: user_address::ActiveModel = existing.into();
        active.is_default = Set(true);
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, address_id: Uuid) -> Result<(), ServiceError> {
        let existing = self.owned(&*self.db, user_id, address_id).await?;
        existing.delete(&*self.db).await?;
        Ok(())
    }

    async fn owned<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        address_id: Uuid,
    ) -> Result<UserAddressModel, ServiceError> {
        UserAddress::find_by_id(address_id)
            .filter(user_address::Column::UserId.eq(user_id))
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Address {} not found", address_id)))
    }

    async fn clear_default<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
    ) -> Result<(), ServiceError> {
        UserAddress::update_many()
            .col_expr(user_address::Column::IsDefault, Expr::value(false))
            .filter(user_address::Column::UserId.eq(user_id))
            .filter(user_address::Column::IsDefault.eq(true))
            .exec(conn)
            .await?;
        Ok(())
    }
}
