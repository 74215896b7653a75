use super::get::find_recipe;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::photos::delete_photo;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("token_auth" = []))
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;

    let recipe = find_recipe(&mut conn, id)?;
    if recipe.author_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the author can delete this recipe".to_string(),
        ));
    }

    // Join rows cascade with the recipe. The photo is referenced by the
    // recipe, so it goes second.
    conn.transaction::<_, ApiError, _>(|conn| {
        diesel::delete(recipes::table.find(id)).execute(conn)?;
        delete_photo(conn, recipe.image_id)?;
        Ok(())
    })?;

    tracing::info!(recipe_id = %id, author_id = %user.id, "recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}
