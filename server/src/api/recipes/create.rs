use super::details::{load_recipe_response, RecipeResponse};
use super::payload::{check_references, write_links, RecipeWriteRequest};
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::models::{NewRecipe, Recipe};
use crate::photos::store_photo;
use crate::schema::recipes;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeWriteRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Unknown ingredient or tag", body = ErrorResponse)
    ),
    security(("token_auth" = []))
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<RecipeWriteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let recipe = req.validate()?;
    let Some(image) = recipe.image.as_ref() else {
        return Err(ApiError::validation("image", "An image is required"));
    };

    let mut conn = pool.get()?;

    let created = conn.transaction::<_, ApiError, _>(|conn| {
        check_references(conn, &recipe)?;
        let image_id = store_photo(conn, user.id, image)?;

        let created: Recipe = diesel::insert_into(recipes::table)
            .values(NewRecipe {
                author_id: user.id,
                name: &recipe.name,
                text: &recipe.text,
                image_id,
                cooking_time: recipe.cooking_time,
            })
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        write_links(conn, created.id, &recipe)?;
        Ok(created)
    })?;

    tracing::info!(recipe_id = %created.id, author_id = %user.id, "recipe created");

    let response = load_recipe_response(&mut conn, Some(user.id), created)?;
    Ok((StatusCode::CREATED, Json(response)))
}
