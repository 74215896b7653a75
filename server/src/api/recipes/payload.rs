//! Recipe write body shared by create and update, and the store-side checks
//! that have to run inside the write transaction.

use crate::api::ApiError;
use crate::models::{NewRecipeIngredient, NewRecipeTag};
use crate::schema::{ingredients, recipe_ingredients, recipe_tags, tags};
use diesel::prelude::*;
use larder_core::{
    decode_data_uri, validate_recipe, DecodedImage, IngredientAmount, RecipeInput, ValidationError,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientAmountRequest {
    /// Ingredient ID
    pub id: Uuid,
    pub amount: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeWriteRequest {
    pub name: String,
    pub text: String,
    /// Minutes, 1..=32767
    pub cooking_time: i32,
    /// `data:image/<format>;base64,<payload>`. Required on create; on update
    /// the stored image is kept when omitted.
    pub image: Option<String>,
    pub ingredients: Vec<IngredientAmountRequest>,
    pub tags: Vec<Uuid>,
}

/// A write body that passed every check not needing the database.
#[derive(Debug)]
pub struct ValidatedRecipe {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: Option<DecodedImage>,
    pub ingredients: Vec<IngredientAmount<Uuid>>,
    pub tags: Vec<Uuid>,
}

impl RecipeWriteRequest {
    pub fn validate(self) -> Result<ValidatedRecipe, ValidationError> {
        let ingredients: Vec<IngredientAmount<Uuid>> = self
            .ingredients
            .iter()
            .map(|i| IngredientAmount {
                id: i.id,
                amount: i.amount,
            })
            .collect();

        let tags = validate_recipe(&RecipeInput {
            name: &self.name,
            text: &self.text,
            cooking_time: self.cooking_time,
            ingredients: &ingredients,
            tags: &self.tags,
        })?;

        let image = self.image.as_deref().map(decode_data_uri).transpose()?;

        Ok(ValidatedRecipe {
            name: self.name.trim().to_string(),
            text: self.text,
            cooking_time: self.cooking_time,
            image,
            ingredients,
            tags,
        })
    }
}

/// 404 unless every referenced ingredient and tag exists.
pub fn check_references(conn: &mut PgConnection, recipe: &ValidatedRecipe) -> Result<(), ApiError> {
    let ingredient_ids: Vec<Uuid> = recipe.ingredients.iter().map(|i| i.id).collect();
    let found: i64 = ingredients::table
        .filter(ingredients::id.eq_any(&ingredient_ids))
        .count()
        .get_result(conn)?;
    if found != ingredient_ids.len() as i64 {
        return Err(ApiError::not_found("Ingredient not found"));
    }

    let found: i64 = tags::table
        .filter(tags::id.eq_any(&recipe.tags))
        .count()
        .get_result(conn)?;
    if found != recipe.tags.len() as i64 {
        return Err(ApiError::not_found("Tag not found"));
    }

    Ok(())
}

/// Replace the recipe's ingredient and tag rows with the ones in `recipe`.
pub fn write_links(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    recipe: &ValidatedRecipe,
) -> QueryResult<()> {
    diesel::delete(recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)))
        .execute(conn)?;
    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
        .execute(conn)?;

    let ingredient_rows: Vec<NewRecipeIngredient> = recipe
        .ingredients
        .iter()
        .map(|i| NewRecipeIngredient {
            recipe_id,
            ingredient_id: i.id,
            amount: i.amount,
        })
        .collect();
    diesel::insert_into(recipe_ingredients::table)
        .values(&ingredient_rows)
        .execute(conn)?;

    let tag_rows: Vec<NewRecipeTag> = recipe
        .tags
        .iter()
        .map(|&tag_id| NewRecipeTag { recipe_id, tag_id })
        .collect();
    diesel::insert_into(recipe_tags::table)
        .values(&tag_rows)
        .execute(conn)?;

    Ok(())
}
