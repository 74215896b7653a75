use crate::api::{ApiError, ErrorResponse};
use crate::db::DbPool;
use crate::models::Ingredient;
use crate::schema::ingredients;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct IngredientSearchParams {
    /// Case-insensitive name prefix
    pub name: Option<String>,
}

/// Escape LIKE wildcards so user input only ever matches literally.
pub fn like_prefix(input: &str) -> String {
    let mut pattern = String::with_capacity(input.len() + 1);
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(IngredientSearchParams),
    responses(
        (status = 200, description = "Ingredients ordered by name", body = Vec<Ingredient>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_ingredients(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<IngredientSearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;

    let mut query = ingredients::table
        .select(Ingredient::as_select())
        .order((ingredients::name.asc(), ingredients::id.asc()))
        .into_boxed();

    if let Some(name) = params.name.as_deref().filter(|n| !n.is_empty()) {
        query = query.filter(ingredients::name.ilike(like_prefix(name)));
    }

    let ingredients: Vec<Ingredient> = query.load(&mut conn)?;

    Ok((StatusCode::OK, Json(ingredients)))
}
