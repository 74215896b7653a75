use super::details::{load_recipe_response, RecipeResponse};
use super::payload::{check_references, write_links, RecipeWriteRequest};
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::models::Recipe;
use crate::photos::{delete_photo, store_photo};
use crate::schema::recipes;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = RecipeWriteRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe, ingredient or tag not found", body = ErrorResponse)
    ),
    security(("token_auth" = []))
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<RecipeWriteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;

    let updated = conn.transaction::<_, ApiError, _>(|conn| {
        // Row lock serializes concurrent edits of the same recipe
        let existing: Recipe = recipes::table
            .find(id)
            .select(Recipe::as_select())
            .for_update()
            .first(conn)
            .optional()?
            .ok_or_else(|| ApiError::not_found("Recipe not found"))?;
        if existing.author_id != user.id {
            return Err(ApiError::Forbidden(
                "Only the author can change this recipe".to_string(),
            ));
        }

        let Json(req) = payload?;
        let recipe = req.validate()?;

        check_references(conn, &recipe)?;

        let new_image_id = match &recipe.image {
            Some(image) => Some(store_photo(conn, user.id, image)?),
            None => None,
        };

        let updated: Recipe = diesel::update(recipes::table.find(id))
            .set((
                recipes::name.eq(&recipe.name),
                recipes::text.eq(&recipe.text),
                recipes::cooking_time.eq(recipe.cooking_time),
                recipes::image_id.eq(new_image_id.unwrap_or(existing.image_id)),
                recipes::updated_at.eq(Utc::now()),
            ))
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        // The old image is unreferenced once the recipe points elsewhere
        if new_image_id.is_some() {
            delete_photo(conn, existing.image_id)?;
        }

        write_links(conn, id, &recipe)?;
        Ok(updated)
    })?;

    tracing::info!(recipe_id = %id, "recipe updated");

    let response = load_recipe_response(&mut conn, Some(user.id), updated)?;
    Ok((StatusCode::OK, Json(response)))
}
