//! Recipe list query parsing.
//!
//! `tags` may repeat (`?tags=lunch&tags=dinner`), which the usual
//! struct-deserializing query extractors can't express, so the list handler
//! collects raw key/value pairs and hands them here.

use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFilters<A> {
    pub author: Option<A>,
    /// Tag slugs; a recipe matches if it carries any of them.
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl<A> Default for RecipeFilters<A> {
    fn default() -> Self {
        Self {
            author: None,
            tags: Vec::new(),
            is_favorited: false,
            is_in_shopping_cart: false,
            page: None,
            limit: None,
        }
    }
}

impl<A: FromStr> RecipeFilters<A> {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, ValidationError> {
        let mut filters = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "author" => {
                    let author = value
                        .parse()
                        .map_err(|_| ValidationError::new("author", "Invalid author id"))?;
                    filters.author = Some(author);
                }
                "tags" => {
                    if !value.is_empty() && !filters.tags.contains(value) {
                        filters.tags.push(value.clone());
                    }
                }
                "is_favorited" => filters.is_favorited = parse_flag("is_favorited", value)?,
                "is_in_shopping_cart" => {
                    filters.is_in_shopping_cart = parse_flag("is_in_shopping_cart", value)?
                }
                "page" => filters.page = Some(parse_int("page", value)?),
                "limit" => filters.limit = Some(parse_int("limit", value)?),
                _ => {}
            }
        }

        Ok(filters)
    }
}

/// Boolean query flags accept `1/0` as well as `true/false`.
pub fn parse_flag(field: &'static str, value: &str) -> Result<bool, ValidationError> {
    match value {
        "1" | "true" | "True" => Ok(true),
        "0" | "false" | "False" | "" => Ok(false),
        _ => Err(ValidationError::new(field, "Expected 0 or 1")),
    }
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    value
        .parse()
        .map_err(|_| ValidationError::new(field, "Expected an integer"))
}
