use crate::api::pagination::{count_over, page_links, resolve_page};
use crate::api::projections::RecipeShortResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::config::Config;
use crate::db::DbPool;
use crate::models::{Recipe, User};
use crate::schema::{follows, recipes, users};
use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SubscriptionParams {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<i64>,
    /// Maximum number of recipes shown per author (default from server configuration)
    pub recipes_limit: Option<i64>,
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    /// Newest recipes first, capped by `recipes_limit`
    pub recipes: Vec<RecipeShortResponse>,
    /// Total number of recipes by this author
    pub recipes_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubscriptionListResponse {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<SubscriptionResponse>,
}

pub fn resolve_recipes_limit(requested: Option<i64>, config: &Config) -> Result<i64, ApiError> {
    match requested {
        Some(limit) if limit < 0 => Err(ApiError::validation(
            "recipes_limit",
            "recipes_limit must not be negative",
        )),
        Some(limit) => Ok(limit),
        None => Ok(config.recipes_limit_default),
    }
}

/// Build the followed-author projection. Only called for authors the viewer
/// follows, so `is_subscribed` is always true.
pub fn subscription_response(
    conn: &mut PgConnection,
    author: User,
    recipes_limit: i64,
) -> QueryResult<SubscriptionResponse> {
    let recipes_count: i64 = recipes::table
        .filter(recipes::author_id.eq(author.id))
        .count()
        .get_result(conn)?;

    let recipes: Vec<Recipe> = recipes::table
        .filter(recipes::author_id.eq(author.id))
        .order((recipes::created_at.desc(), recipes::id.desc()))
        .limit(recipes_limit)
        .select(Recipe::as_select())
        .load(conn)?;

    Ok(SubscriptionResponse {
        id: author.id,
        email: author.email,
        username: author.username,
        first_name: author.first_name,
        last_name: author.last_name,
        is_subscribed: true,
        recipes: recipes.into_iter().map(RecipeShortResponse::from).collect(),
        recipes_count,
    })
}

#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    tag = "users",
    params(SubscriptionParams),
    responses(
        (status = 200, description = "Authors the user follows", body = SubscriptionListResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    security(("token_auth" = []))
)]
pub async fn list_subscriptions(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<Config>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<SubscriptionParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = resolve_page(params.page, params.limit, &config)?;
    let recipes_limit = resolve_recipes_limit(params.recipes_limit, &config)?;

    let mut conn = pool.get()?;

    let rows: Vec<(User, i64)> = users::table
        .inner_join(follows::table.on(follows::author_id.eq(users::id)))
        .filter(follows::user_id.eq(user.id))
        .order((users::username.asc(), users::id.asc()))
        .select((User::as_select(), count_over()))
        .limit(page.limit)
        .offset(page.offset())
        .load(&mut conn)?;

    let count = rows.first().map(|(_, total)| *total).unwrap_or(0);
    let links = page_links(&uri, &page, count)?;

    let results = rows
        .into_iter()
        .map(|(author, _)| subscription_response(&mut conn, author, recipes_limit))
        .collect::<QueryResult<Vec<_>>>()?;

    Ok((
        StatusCode::OK,
        Json(SubscriptionListResponse {
            count,
            next: links.next,
            previous: links.previous,
            results,
        }),
    ))
}
