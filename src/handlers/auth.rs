use crate::{
    auth::CurrentUser,
    entities::{UserModel, UserRole},
    errors::ServiceError,
    services::users::RegisterInput,
    AppState,
};
use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Session endpoints. Login responses carry the session as an http-only
/// cookie; the body echoes the account without its password hash.
pub fn public_auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/user/register", post(register))
        .route("/auth/user/login", post(login_user))
        .route("/auth/admin/login", post(login_admin))
        .route("/auth/inventory/login", post(login_inventory))
        .route("/auth/store/login", post(login_store))
        .route("/auth/logout", post(logout))
}

pub fn session_router() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: UserModel,
}

async fn establish_session(
    state: &AppState,
    user: UserModel,
) -> Result<impl IntoResponse, ServiceError> {
    let token = state.auth.issue_token(&user)?;
    let cookie = state.auth.session_cookie(&token);
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(SessionResponse { user }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/user/register",
    request_body = RegisterInput,
    responses(
        (status = 200, description = "Account created and session established", body = SessionResponse),
        (status = 409, description = "Email already registered", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.services.users.register(input).await?;
    establish_session(&state, user).await
}

async fn login(
    state: AppState,
    input: LoginInput,
    expected_role: UserRole,
) -> Result<impl IntoResponse, ServiceError> {
    input.validate()?;
    let user = state
        .services
        .users
        .authenticate(&input.email, &input.password, expected_role)
        .await?;
    establish_session(&state, user).await
}

#[utoipa::path(
    post,
    path = "/api/auth/user/login",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Session established", body = SessionResponse),
        (status = 401, description = "Invalid credentials", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_user(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, ServiceError> {
    login(state, input, UserRole::User).await
}

pub async fn login_admin(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, ServiceError> {
    login(state, input, UserRole::Admin).await
}

pub async fn login_inventory(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, ServiceError> {
    login(state, input, UserRole::Inventory).await
}

pub async fn login_store(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, ServiceError> {
    login(state, input, UserRole::Store).await
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, state.auth.clear_cookie())]),
        Json(serde_json::json!({ "success": true })),
    )
}

/// Who am I, based on the session cookie.
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.services.users.get_user(current.user_id).await?;
    Ok(Json(SessionResponse { user }))
}
