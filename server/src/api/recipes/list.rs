use super::details::{load_recipe_responses, RecipeResponse};
use crate::api::pagination::{count_over, page_links, resolve_page};
use crate::api::{ApiError, ErrorResponse};
use crate::auth::MaybeUser;
use crate::config::Config;
use crate::db::DbPool;
use crate::models::Recipe;
use crate::schema::{favorites, recipe_tags, recipes, shopping_cart_items, tags};
use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use larder_core::RecipeFilters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Documents the accepted query parameters. Parsing goes through
/// `RecipeFilters` because `tags` may repeat.
#[derive(Debug, Deserialize, IntoParams)]
#[allow(dead_code)]
pub struct ListRecipesParams {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<i64>,
    /// Only recipes by this author
    pub author: Option<Uuid>,
    /// Tag slug; repeat to match recipes carrying any of several tags
    pub tags: Option<Vec<String>>,
    /// 1 to show only the requester's favorites (ignored when anonymous)
    pub is_favorited: Option<String>,
    /// 1 to show only recipes in the requester's cart (ignored when anonymous)
    pub is_in_shopping_cart: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    /// Total number of matching recipes
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<RecipeResponse>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Page of recipes, newest first", body = ListRecipesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    MaybeUser(viewer): MaybeUser,
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<Config>>,
    OriginalUri(uri): OriginalUri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let filters = RecipeFilters::<Uuid>::from_pairs(&pairs)?;
    let page = resolve_page(filters.page, filters.limit, &config)?;
    let viewer_id = viewer.map(|v| v.id);

    let mut conn = pool.get()?;

    let mut query = recipes::table.into_boxed();

    if let Some(author) = filters.author {
        query = query.filter(recipes::author_id.eq(author));
    }

    // Any of the given tags
    if !filters.tags.is_empty() {
        query = query.filter(
            recipes::id.eq_any(
                recipe_tags::table
                    .inner_join(tags::table)
                    .filter(tags::slug.eq_any(filters.tags.clone()))
                    .select(recipe_tags::recipe_id),
            ),
        );
    }

    if let Some(viewer_id) = viewer_id {
        if filters.is_favorited {
            query = query.filter(
                recipes::id.eq_any(
                    favorites::table
                        .filter(favorites::user_id.eq(viewer_id))
                        .select(favorites::recipe_id),
                ),
            );
        }
        if filters.is_in_shopping_cart {
            query = query.filter(
                recipes::id.eq_any(
                    shopping_cart_items::table
                        .filter(shopping_cart_items::user_id.eq(viewer_id))
                        .select(shopping_cart_items::recipe_id),
                ),
            );
        }
    }

    let rows: Vec<(Recipe, i64)> = query
        .order((recipes::created_at.desc(), recipes::id.desc()))
        .select((Recipe::as_select(), count_over()))
        .limit(page.limit)
        .offset(page.offset())
        .load(&mut conn)?;

    let count = rows.first().map(|(_, total)| *total).unwrap_or(0);
    let links = page_links(&uri, &page, count)?;

    let recipes = rows.into_iter().map(|(recipe, _)| recipe).collect();
    let results = load_recipe_responses(&mut conn, viewer_id, recipes)?;

    Ok((
        StatusCode::OK,
        Json(ListRecipesResponse {
            count,
            next: links.next,
            previous: links.previous,
            results,
        }),
    ))
}
