use crate::{
    entities::{serviceable_pincode, ServiceablePincode, ServiceablePincodeModel},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Delivery coverage lookups by pincode.
#[derive(Clone)]
pub struct PincodeService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePincodeInput {
    #[validate(length(min = 6, max = 6))]
    pub pincode: String,
    #[validate(length(min = 2, max = 100))]
    pub city: String,
    #[validate(length(min = 2, max = 100))]
    pub state: String,
    #[validate(range(min = 1, max = 30))]
    #[serde(default = "default_delivery_days")]
    pub delivery_days: i32,
}

fn default_delivery_days() -> i32 {
    5
}

/// Public availability answer for one pincode.
#[derive(Debug, Serialize, ToSchema)]
pub struct PincodeCheck {
    pub serviceable: bool,
    pub city: Option<String>,
    pub state: Option<String>,
    pub delivery_days: Option<i32>,
}

impl PincodeService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn check(&self, pincode: &str) -> Result<PincodeCheck, ServiceError> {
        let row = ServiceablePincode::find()
            .filter(serviceable_pincode::Column::Pincode.eq(pincode))
            .filter(serviceable_pincode::Column::IsActive.eq(true))
            .one(&*self.db)
            .await?;

        Ok(match row {
            Some(row) => PincodeCheck {
                serviceable: true,
                city: Some(row.city),
                state: Some(row.state),
                delivery_days: Some(row.delivery_days),
            },
            None => PincodeCheck {
                serviceable: false,
                city: None,
                state: None,
                delivery_days: None,
            },
        })
    }

    pub async fn list(&self) -> Result<Vec<ServiceablePincodeModel>, ServiceError> {
        Ok(ServiceablePincode::find()
            .order_by_asc(serviceable_pincode::Column::Pincode)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreatePincodeInput,
    ) -> Result<ServiceablePincodeModel, ServiceError> {
        input.validate()?;

        let exists = ServiceablePincode::find()
            .filter(serviceable_pincode::Column::Pincode.eq(input.pincode.clone()))
            .one(&*self.db)
            .await?;
        if exists.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Pincode {} is already serviceable",
                input.pincode
            )));
        }

        let model = serviceable_pincode::ActiveModel {
            id: Set(Uuid::new_v4()),
            pincode: Set(input.pincode),
            city: Set(input.city),
            state: Set(input.state),
            delivery_days: Set(input.delivery_days),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(&*self.db).await?)
    }
}
