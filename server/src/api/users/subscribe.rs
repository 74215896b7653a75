use super::subscriptions::{resolve_recipes_limit, subscription_response, SubscriptionResponse};
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::config::Config;
use crate::db::DbPool;
use crate::models::{NewFollow, User};
use crate::schema::{follows, users};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SubscribeParams {
    /// Maximum number of recipes shown in the response
    pub recipes_limit: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "Author ID"),
        SubscribeParams
    ),
    responses(
        (status = 201, description = "Now following the author", body = SubscriptionResponse),
        (status = 400, description = "Self-follow or already following", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("token_auth" = []))
)]
pub async fn subscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<Config>>,
    Path(author_id): Path<Uuid>,
    Query(params): Query<SubscribeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let recipes_limit = resolve_recipes_limit(params.recipes_limit, &config)?;
    let mut conn = pool.get()?;

    let author: User = users::table
        .find(author_id)
        .select(User::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if author.id == user.id {
        return Err(ApiError::validation(
            "author",
            "You cannot subscribe to yourself",
        ));
    }

    let already_following: bool = diesel::select(diesel::dsl::exists(
        follows::table
            .filter(follows::user_id.eq(user.id))
            .filter(follows::author_id.eq(author.id)),
    ))
    .get_result(&mut conn)?;
    if already_following {
        return Err(ApiError::validation(
            "author",
            "You are already subscribed to this user",
        ));
    }

    diesel::insert_into(follows::table)
        .values(NewFollow {
            user_id: user.id,
            author_id: author.id,
        })
        .execute(&mut conn)?;

    tracing::info!(user_id = %user.id, author_id = %author.id, "subscribed");

    let response = subscription_response(&mut conn, author, recipes_limit)?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found or not subscribed", body = ErrorResponse)
    ),
    security(("token_auth" = []))
)]
pub async fn unsubscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;

    let author_exists: bool =
        diesel::select(diesel::dsl::exists(users::table.find(author_id))).get_result(&mut conn)?;
    if !author_exists {
        return Err(ApiError::not_found("User not found"));
    }

    let deleted = diesel::delete(
        follows::table
            .filter(follows::user_id.eq(user.id))
            .filter(follows::author_id.eq(author_id)),
    )
    .execute(&mut conn)?;

    if deleted == 0 {
        return Err(ApiError::not_found("You are not subscribed to this user"));
    }

    tracing::info!(user_id = %user.id, author_id = %author_id, "unsubscribed");

    Ok(StatusCode::NO_CONTENT)
}
