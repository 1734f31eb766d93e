use crate::entities::{User, UserModel, UserRole};
use crate::errors::ServiceError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::AppState;

/// Claim structure for JWT session tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub store_id: Option<Uuid>,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated session extracted from the token cookie. Inserted into
/// request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub store_id: Option<Uuid>,
    pub token_id: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Role allow-lists applied by the route groups. Each surface is gated to
/// exactly one role.
pub const USER_ROLES: &[UserRole] = &[UserRole::User];
pub const ADMIN_ROLES: &[UserRole] = &[UserRole::Admin];
pub const INVENTORY_ROLES: &[UserRole] = &[UserRole::Inventory];
pub const STORE_ROLES: &[UserRole] = &[UserRole::Store];

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiration: Duration,
    pub cookie_name: String,
    pub secure_cookies: bool,
}

/// Handles token issuance, validation and password hashing.
#[derive(Clone, Debug)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Generate a signed session token for a user.
    pub fn issue_token(&self, user: &UserModel) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now
            + ChronoDuration::from_std(self.config.token_expiration)
                .map_err(|_| ServiceError::InternalError("Invalid token duration".to_string()))?;

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            store_id: user.store_id,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::InternalError(format!("Failed to create token: {}", e)))
    }

    /// Validate a session token and extract the claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                ServiceError::Unauthorized("Session expired".to_string())
            }
            _ => ServiceError::Unauthorized("Invalid session token".to_string()),
        })
    }

    pub fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ServiceError::InternalError(format!("Failed to hash password: {}", e)))
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ServiceError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| ServiceError::InternalError(format!("Corrupt password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// `Set-Cookie` value establishing the session.
    pub fn session_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
            self.config.cookie_name,
            token,
            self.config.token_expiration.as_secs()
        );
        if self.config.secure_cookies {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value clearing the session.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax",
            self.config.cookie_name
        )
    }
}

/// Pulls the session token out of the `Cookie` header.
pub fn token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookie_header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(cookie_name) {
            return parts.next().map(|v| v.to_string());
        }
    }
    None
}

/// Validates the session cookie and confirms the account still exists and
/// is active, so deactivation takes effect before the token expires.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, ServiceError> {
    let token = token_from_headers(headers, state.auth.cookie_name())
        .ok_or_else(|| ServiceError::Unauthorized("Not authenticated".to_string()))?;

    let claims = state.auth.validate_token(&token)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ServiceError::Unauthorized("Invalid session token".to_string()))?;

    let account = User::find_by_id(user_id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized("Unknown account".to_string()))?;
    if !account.is_active {
        return Err(ServiceError::Unauthorized(
            "Account is disabled".to_string(),
        ));
    }

    Ok(CurrentUser {
        user_id,
        role: claims.role,
        store_id: claims.store_id,
        token_id: claims.jti,
    })
}

async fn authorize(
    state: AppState,
    mut request: Request,
    next: Next,
    allowed: &[UserRole],
) -> Result<Response, ServiceError> {
    let user = authenticate(&state, request.headers()).await?;

    if !allowed.is_empty() && !allowed.contains(&user.role) {
        return Err(ServiceError::Forbidden(
            "Insufficient role for this resource".to_string(),
        ));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Requires a valid session of any role.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    authorize(state, request, next, &[]).await
}

/// Requires a shopper session.
pub async fn require_user(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    authorize(state, request, next, USER_ROLES).await
}

/// Requires an admin session.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    authorize(state, request, next, ADMIN_ROLES).await
}

/// Requires an inventory session.
pub async fn require_inventory(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    authorize(state, request, next, INVENTORY_ROLES).await
}

/// Requires a store session.
pub async fn require_store(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    authorize(state, request, next, STORE_ROLES).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_service() -> AuthService {
        AuthService::new(AuthConfig {
            jwt_secret: "test_secret_that_is_long_enough_for_hs256".to_string(),
            token_expiration: Duration::from_secs(3600),
            cookie_name: "token".to_string(),
            secure_cookies: false,
        })
    }

    fn test_user(role: UserRole) -> UserModel {
        UserModel {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: String::new(),
            name: "Test User".to_string(),
            phone: None,
            role,
            store_id: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let svc = test_service();
        let user = test_user(UserRole::Store);
        let token = svc.issue_token(&user).unwrap();
        let claims = svc.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, UserRole::Store);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let svc = test_service();
        let user = test_user(UserRole::User);
        let mut token = svc.issue_token(&user).unwrap();
        token.push('x');
        assert!(svc.validate_token(&token).is_err());
    }

    #[test]
    fn password_hash_verifies() {
        let svc = test_service();
        let hash = svc.hash_password("s3cret-password").unwrap();
        assert!(svc.verify_password("s3cret-password", &hash).unwrap());
        assert!(!svc.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn cookie_header_is_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; token=abc.def.ghi; lang=en".parse().unwrap(),
        );
        assert_eq!(
            token_from_headers(&headers, "token").as_deref(),
            Some("abc.def.ghi")
        );
        assert!(token_from_headers(&headers, "session").is_none());
    }
}
