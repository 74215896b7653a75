use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use larder_core::ValidationError;
use thiserror::Error;

use super::ErrorResponse;

/// Every handler failure funnels through here so the JSON error shape and
/// status mapping stay in one place.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation(ValidationError::new(field, message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let field = match &self {
            ApiError::Validation(e) => e.field.map(str::to_string),
            _ => None,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                field,
            }),
        )
            .into_response()
    }
}

impl From<DieselError> for ApiError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => ApiError::not_found("Not found"),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                ApiError::Validation(unique_violation(info.constraint_name()))
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                ApiError::Validation(check_violation(info.constraint_name()))
            }
            e => {
                tracing::error!("Database error: {}", e);
                ApiError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::general(rejection.body_text()))
    }
}

impl From<diesel::r2d2::PoolError> for ApiError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        tracing::error!("Failed to get database connection: {}", err);
        ApiError::Internal("Database connection failed".to_string())
    }
}

/// Translate a store-level uniqueness failure into the message a client
/// would have received from the pre-insert check it raced with.
pub fn unique_violation(constraint: Option<&str>) -> ValidationError {
    match constraint {
        Some("users_email_key") => {
            ValidationError::new("email", "A user with that email already exists")
        }
        Some("users_username_key") => {
            ValidationError::new("username", "A user with that username already exists")
        }
        Some("follows_user_author_key") => {
            ValidationError::new("author", "You are already subscribed to this user")
        }
        Some("favorites_user_recipe_key") => {
            ValidationError::new("recipe", "Recipe is already in favorites")
        }
        Some("shopping_cart_items_user_recipe_key") => {
            ValidationError::new("recipe", "Recipe is already in the shopping cart")
        }
        _ => ValidationError::general("Duplicate value"),
    }
}

pub fn check_violation(constraint: Option<&str>) -> ValidationError {
    match constraint {
        Some("follows_no_self_follow") => {
            ValidationError::new("author", "You cannot subscribe to yourself")
        }
        _ => ValidationError::general("Value out of range"),
    }
}
