use crate::errors::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Store-scoped handlers need an assigned store on the session.
pub fn require_store_id(
    user: &crate::auth::CurrentUser,
) -> Result<uuid::Uuid, ServiceError> {
    user.store_id
        .ok_or_else(|| ServiceError::InvalidOperation("No store assigned".to_string()))
}
