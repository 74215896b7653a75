use crate::api::{ApiError, ErrorResponse};
use crate::db::DbPool;
use crate::models::Tag;
use crate::schema::tags;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    responses(
        (status = 200, description = "All tags ordered by name", body = Vec<Tag>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_tags(State(pool): State<Arc<DbPool>>) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;

    let tags: Vec<Tag> = tags::table
        .order((tags::name.asc(), tags::id.asc()))
        .select(Tag::as_select())
        .load(&mut conn)?;

    Ok((StatusCode::OK, Json(tags)))
}
