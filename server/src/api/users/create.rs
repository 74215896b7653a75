use crate::api::{ApiError, ErrorResponse};
use crate::auth::hash_password;
use crate::db::DbPool;
use crate::models::{NewUser, User};
use crate::schema::users;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use larder_core::{validate_email, validate_name, validate_password, validate_username};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body(content = CreateUserRequest, example = json!({
        "email": "cook@example.com",
        "username": "cook",
        "first_name": "Anna",
        "last_name": "Cook",
        "password": "correct horse"
    })),
    responses(
        (status = 201, description = "User registered", body = CreateUserResponse),
        (status = 400, description = "Invalid or duplicate field", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let email = req.email.trim();
    let username = req.username.trim();
    let first_name = req.first_name.trim();
    let last_name = req.last_name.trim();

    validate_email(email)?;
    validate_username(username)?;
    validate_name("first_name", first_name)?;
    validate_name("last_name", last_name)?;
    validate_password("password", &req.password)?;

    let mut conn = pool.get()?;

    // Friendlier errors than the constraint names; the unique indexes still
    // decide if two signups race
    let email_taken: bool = diesel::select(diesel::dsl::exists(
        users::table.filter(users::email.eq(email)),
    ))
    .get_result(&mut conn)?;
    if email_taken {
        return Err(ApiError::validation(
            "email",
            "A user with that email already exists",
        ));
    }

    let username_taken: bool = diesel::select(diesel::dsl::exists(
        users::table.filter(users::username.eq(username)),
    ))
    .get_result(&mut conn)?;
    if username_taken {
        return Err(ApiError::validation(
            "username",
            "A user with that username already exists",
        ));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::Internal("Failed to hash password".to_string())
    })?;

    let user: User = diesel::insert_into(users::table)
        .values(NewUser {
            email,
            username,
            first_name,
            last_name,
            password_hash: &password_hash,
        })
        .returning(User::as_returning())
        .get_result(&mut conn)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }),
    ))
}
