//! Full recipe projection, resolved for a batch of recipes at once so a list
//! page costs a fixed number of queries regardless of its size.

use crate::api::projections::{followed_among, UserResponse};
use crate::models::{Recipe, Tag, User};
use crate::photos::photo_url;
use crate::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, shopping_cart_items, tags, users,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeIngredientResponse {
    /// Ingredient ID
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub tags: Vec<Tag>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    /// Always false for anonymous requests
    pub is_favorited: bool,
    /// Always false for anonymous requests
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// URL of the recipe image
    pub image: String,
    pub text: String,
    /// Minutes
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

pub fn load_recipe_response(
    conn: &mut PgConnection,
    viewer: Option<Uuid>,
    recipe: Recipe,
) -> QueryResult<RecipeResponse> {
    load_recipe_responses(conn, viewer, vec![recipe])?
        .pop()
        .ok_or(diesel::result::Error::NotFound)
}

/// Project `recipes` for `viewer`, keeping their order.
pub fn load_recipe_responses(
    conn: &mut PgConnection,
    viewer: Option<Uuid>,
    recipes: Vec<Recipe>,
) -> QueryResult<Vec<RecipeResponse>> {
    if recipes.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
    let author_ids: Vec<Uuid> = recipes
        .iter()
        .map(|r| r.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let authors: HashMap<Uuid, User> = users::table
        .filter(users::id.eq_any(&author_ids))
        .select(User::as_select())
        .load::<User>(conn)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let followed = followed_among(conn, viewer, &author_ids)?;

    let mut tags_by_recipe: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    let tag_rows: Vec<(Uuid, Tag)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(&recipe_ids))
        .order((tags::name.asc(), tags::id.asc()))
        .select((recipe_tags::recipe_id, Tag::as_select()))
        .load(conn)?;
    for (recipe_id, tag) in tag_rows {
        tags_by_recipe.entry(recipe_id).or_default().push(tag);
    }

    let mut ingredients_by_recipe: HashMap<Uuid, Vec<RecipeIngredientResponse>> = HashMap::new();
    let ingredient_rows: Vec<(Uuid, Uuid, String, String, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&recipe_ids))
        .order((ingredients::name.asc(), ingredients::id.asc()))
        .select((
            recipe_ingredients::recipe_id,
            ingredients::id,
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(conn)?;
    for (recipe_id, id, name, measurement_unit, amount) in ingredient_rows {
        ingredients_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(RecipeIngredientResponse {
                id,
                name,
                measurement_unit,
                amount,
            });
    }

    let (favorited, in_cart): (HashSet<Uuid>, HashSet<Uuid>) = match viewer {
        Some(viewer) => (
            favorites::table
                .filter(favorites::user_id.eq(viewer))
                .filter(favorites::recipe_id.eq_any(&recipe_ids))
                .select(favorites::recipe_id)
                .load::<Uuid>(conn)?
                .into_iter()
                .collect(),
            shopping_cart_items::table
                .filter(shopping_cart_items::user_id.eq(viewer))
                .filter(shopping_cart_items::recipe_id.eq_any(&recipe_ids))
                .select(shopping_cart_items::recipe_id)
                .load::<Uuid>(conn)?
                .into_iter()
                .collect(),
        ),
        None => (HashSet::new(), HashSet::new()),
    };

    recipes
        .into_iter()
        .map(|recipe| {
            let author = authors
                .get(&recipe.author_id)
                .cloned()
                .ok_or(diesel::result::Error::NotFound)?;
            let is_subscribed = followed.contains(&author.id);

            Ok(RecipeResponse {
                id: recipe.id,
                tags: tags_by_recipe.remove(&recipe.id).unwrap_or_default(),
                author: UserResponse::new(author, is_subscribed),
                ingredients: ingredients_by_recipe.remove(&recipe.id).unwrap_or_default(),
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                name: recipe.name,
                image: photo_url(recipe.image_id),
                text: recipe.text,
                cooking_time: recipe.cooking_time,
                created_at: recipe.created_at,
            })
        })
        .collect()
}
