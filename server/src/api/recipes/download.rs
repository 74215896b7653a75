use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::schema::{ingredients, recipe_ingredients, shopping_cart_items};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use diesel::dsl::sum;
use diesel::prelude::*;
use larder_core::{render_shopping_list, ShoppingListLine};
use std::sync::Arc;
use uuid::Uuid;

pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Sum ingredient amounts across every recipe in the user's cart, one line
/// per (name, unit) pair, ordered by name.
pub fn aggregate_shopping_list(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> QueryResult<Vec<ShoppingListLine>> {
    let rows: Vec<(String, String, Option<i64>)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .inner_join(
            shopping_cart_items::table
                .on(shopping_cart_items::recipe_id.eq(recipe_ingredients::recipe_id)),
        )
        .filter(shopping_cart_items::user_id.eq(user_id))
        .group_by((ingredients::name, ingredients::measurement_unit))
        .select((
            ingredients::name,
            ingredients::measurement_unit,
            sum(recipe_ingredients::amount),
        ))
        .order((ingredients::name.asc(), ingredients::measurement_unit.asc()))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(name, measurement_unit, total)| ShoppingListLine {
            name,
            measurement_unit,
            total: total.unwrap_or(0),
        })
        .collect())
}

#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    tag = "recipes",
    responses(
        (status = 200, description = "Aggregated shopping list", content_type = "text/plain"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("token_auth" = []))
)]
pub async fn download_shopping_cart(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;

    let lines = aggregate_shopping_list(&mut conn, user.id)?;
    tracing::info!(user_id = %user.id, lines = lines.len(), "shopping list exported");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", SHOPPING_LIST_FILENAME),
            ),
        ],
        render_shopping_list(&lines),
    ))
}
