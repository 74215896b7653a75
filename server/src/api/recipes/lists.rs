//! Per-user recipe lists: favorites and the shopping cart share one add/remove flow.

use super::get::find_recipe;
use crate::api::projections::RecipeShortResponse;
use crate::api::ApiError;
use crate::models::{NewFavorite, NewShoppingCartItem, Recipe};
use crate::schema::{favorites, shopping_cart_items};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeList {
    Favorites,
    ShoppingCart,
}

impl RecipeList {
    fn label(self) -> &'static str {
        match self {
            RecipeList::Favorites => "favorites",
            RecipeList::ShoppingCart => "the shopping cart",
        }
    }

    fn already_listed_message(self) -> String {
        format!("Recipe is already in {}", self.label())
    }

    fn not_listed_message(self) -> String {
        format!("Recipe is not in {}", self.label())
    }

    fn contains(self, conn: &mut PgConnection, user_id: Uuid, recipe_id: Uuid) -> QueryResult<bool> {
        match self {
            RecipeList::Favorites => diesel::select(diesel::dsl::exists(
                favorites::table
                    .filter(favorites::user_id.eq(user_id))
                    .filter(favorites::recipe_id.eq(recipe_id)),
            ))
            .get_result(conn),
            RecipeList::ShoppingCart => diesel::select(diesel::dsl::exists(
                shopping_cart_items::table
                    .filter(shopping_cart_items::user_id.eq(user_id))
                    .filter(shopping_cart_items::recipe_id.eq(recipe_id)),
            ))
            .get_result(conn),
        }
    }

    // A concurrent duplicate trips the table's (user_id, recipe_id) unique key
    // and surfaces as the same 400
    fn insert(self, conn: &mut PgConnection, user_id: Uuid, recipe_id: Uuid) -> QueryResult<usize> {
        match self {
            RecipeList::Favorites => diesel::insert_into(favorites::table)
                .values(NewFavorite { user_id, recipe_id })
                .execute(conn),
            RecipeList::ShoppingCart => diesel::insert_into(shopping_cart_items::table)
                .values(NewShoppingCartItem { user_id, recipe_id })
                .execute(conn),
        }
    }

    fn delete(self, conn: &mut PgConnection, user_id: Uuid, recipe_id: Uuid) -> QueryResult<usize> {
        match self {
            RecipeList::Favorites => diesel::delete(
                favorites::table
                    .filter(favorites::user_id.eq(user_id))
                    .filter(favorites::recipe_id.eq(recipe_id)),
            )
            .execute(conn),
            RecipeList::ShoppingCart => diesel::delete(
                shopping_cart_items::table
                    .filter(shopping_cart_items::user_id.eq(user_id))
                    .filter(shopping_cart_items::recipe_id.eq(recipe_id)),
            )
            .execute(conn),
        }
    }

    /// Add a recipe to the user's list. 404 for an unknown recipe, 400 if it
    /// is already listed.
    pub fn add(
        self,
        conn: &mut PgConnection,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<RecipeShortResponse, ApiError> {
        let recipe: Recipe = find_recipe(conn, recipe_id)?;

        if self.contains(conn, user_id, recipe.id)? {
            return Err(ApiError::validation("recipe", self.already_listed_message()));
        }
        self.insert(conn, user_id, recipe.id)?;

        tracing::debug!(%user_id, recipe_id = %recipe.id, list = self.label(), "recipe listed");

        Ok(RecipeShortResponse::from(recipe))
    }

    /// Remove a recipe from the user's list. 404 for an unknown recipe or one
    /// that was not listed.
    pub fn remove(self, conn: &mut PgConnection, user_id: Uuid, recipe_id: Uuid) -> Result<(), ApiError> {
        let recipe = find_recipe(conn, recipe_id)?;

        if self.delete(conn, user_id, recipe.id)? == 0 {
            return Err(ApiError::not_found(self.not_listed_message()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_list() {
        assert_eq!(
            RecipeList::Favorites.already_listed_message(),
            "Recipe is already in favorites"
        );
        assert_eq!(
            RecipeList::ShoppingCart.not_listed_message(),
            "Recipe is not in the shopping cart"
        );
    }
}
