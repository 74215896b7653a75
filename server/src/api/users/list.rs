use crate::api::pagination::{count_over, page_links, resolve_page, PageParams};
use crate::api::projections::{user_responses, UserResponse};
use crate::api::{ApiError, ErrorResponse};
use crate::auth::MaybeUser;
use crate::config::Config;
use crate::db::DbPool;
use crate::models::User;
use crate::schema::users;
use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserListResponse {
    /// Total number of users
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<UserResponse>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(PageParams),
    responses(
        (status = 200, description = "Page of users", body = UserListResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    )
)]
pub async fn list_users(
    MaybeUser(viewer): MaybeUser,
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<Config>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = resolve_page(params.page, params.limit, &config)?;
    let mut conn = pool.get()?;

    let rows: Vec<(User, i64)> = users::table
        .order((users::username.asc(), users::id.asc()))
        .select((User::as_select(), count_over()))
        .limit(page.limit)
        .offset(page.offset())
        .load(&mut conn)?;

    let count = rows.first().map(|(_, total)| *total).unwrap_or(0);
    let links = page_links(&uri, &page, count)?;

    let users = rows.into_iter().map(|(user, _)| user).collect();
    let results = user_responses(&mut conn, viewer.map(|v| v.id), users)?;

    Ok((
        StatusCode::OK,
        Json(UserListResponse {
            count,
            next: links.next,
            previous: links.previous,
            results,
        }),
    ))
}
