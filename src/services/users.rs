use crate::{
    auth::AuthService,
    entities::{user, User, UserModel, UserRole},
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

/// Account management and credential checks for all four roles.
#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
    auth: Arc<AuthService>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub phone: Option<String>,
}

/// Staff account creation, admin only. Store accounts must name their
/// store.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub store_id: Option<Uuid>,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Self-service shopper registration. Always lands in the `user` role.
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterInput) -> Result<UserModel, ServiceError> {
        input.validate()?;

        if self.find_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::Conflict(
                "Email already registered".to_string(),
            ));
        }

        let password_hash = self.auth.hash_password(&input.password)?;
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email.to_lowercase()),
            password_hash: Set(password_hash),
            name: Set(input.name),
            phone: Set(input.phone),
            role: Set(UserRole::User),
            store_id: Set(None),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(&*self.db).await?;
        info!("Registered user {}", created.id);
        Ok(created)
    }

    /// Creates a staff account. Callers gate this behind the admin role.
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUserInput) -> Result<UserModel, ServiceError> {
        input.validate()?;

        if input.role == UserRole::Store && input.store_id.is_none() {
            return Err(ServiceError::ValidationError(
                "Store accounts need a store_id".to_string(),
            ));
        }

        if self.find_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::Conflict(
                "Email already registered".to_string(),
            ));
        }

        let password_hash = self.auth.hash_password(&input.password)?;
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email.to_lowercase()),
            password_hash: Set(password_hash),
            name: Set(input.name),
            phone: Set(input.phone),
            role: Set(input.role),
            store_id: Set(input.store_id),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(&*self.db).await?;
        info!("Created {} account {}", created.role, created.id);
        Ok(created)
    }

    /// Checks credentials for a role-specific login. The expected role is
    /// part of the check so a shopper cannot log into the admin surface
    /// with valid credentials.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        expected_role: UserRole,
    ) -> Result<UserModel, ServiceError> {
        let invalid = || ServiceError::Unauthorized("Invalid credentials".to_string());

        let user = self
            .find_by_email(email)
            .await?
            .filter(|u| u.role == expected_role)
            .ok_or_else(invalid)?;

        if !self.auth.verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        if !user.is_active {
            return Err(ServiceError::Unauthorized(
                "Account is disabled".to_string(),
            ));
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<UserModel, ServiceError> {
        User::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    pub async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<UserModel>, ServiceError> {
        let mut query = User::find().order_by_desc(user::Column::CreatedAt);
        if let Some(role) = role {
            query = query.filter(user::Column::Role.eq(role));
        }
        Ok(query.all(&*self.db).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, ServiceError> {
        Ok(User::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(&*self.db)
            .await?)
    }
}
