//! Field validation for user and recipe input.
//!
//! Uniqueness is the store's job; everything checkable without a database
//! lives here so handlers can reject bad input before opening a transaction.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::ValidationError;

/// Upper bound for small positive integer columns (cooking time, amounts).
pub const MAX_SMALL_INT: i32 = 32767;

pub const MAX_USERNAME_LEN: usize = 150;
pub const MAX_NAME_LEN: usize = 150;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_RECIPE_NAME_LEN: usize = 200;

/// Usernames that would shadow fixed routes under `/users/`.
const RESERVED_USERNAMES: &[&str] = &["me"];

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::new("username", "Username cannot be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ValidationError::new(
            "username",
            format!("Username must be at most {} characters", MAX_USERNAME_LEN),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(ValidationError::new(
            "username",
            "Username may contain only letters, digits and @/./+/-/_",
        ));
    }
    if RESERVED_USERNAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(username))
    {
        return Err(ValidationError::new(
            "username",
            format!("Username \"{}\" is reserved", username),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::new(
            "email",
            format!("Email must be at most {} characters", MAX_EMAIL_LEN),
        ));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::new("email", "Enter a valid email address"));
    }
    Ok(())
}

/// First and last names share the same rules.
pub fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "This field cannot be empty"));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            field,
            format!("Must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(())
}

pub fn validate_password(field: &'static str, password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            field,
            format!(
                "Password is too short. It must contain at least {} characters",
                MIN_PASSWORD_LEN
            ),
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(field, "Password cannot be entirely numeric"));
    }
    Ok(())
}

/// One `{id, amount}` entry of a recipe write body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientAmount<Id> {
    pub id: Id,
    pub amount: i32,
}

/// The store-independent part of a recipe create/update body.
#[derive(Debug, Clone)]
pub struct RecipeInput<'a, Id> {
    pub name: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
    pub ingredients: &'a [IngredientAmount<Id>],
    pub tags: &'a [Id],
}

/// Validate a recipe body and return its tag ids with duplicates removed
/// (first occurrence wins). Repeated ingredients are an error since each
/// would need its own amount.
pub fn validate_recipe<Id>(input: &RecipeInput<'_, Id>) -> Result<Vec<Id>, ValidationError>
where
    Id: Copy + Eq + Hash,
{
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("name", "Name cannot be empty"));
    }
    if name.chars().count() > MAX_RECIPE_NAME_LEN {
        return Err(ValidationError::new(
            "name",
            format!("Name must be at most {} characters", MAX_RECIPE_NAME_LEN),
        ));
    }
    if input.text.trim().is_empty() {
        return Err(ValidationError::new("text", "Text cannot be empty"));
    }
    if !(1..=MAX_SMALL_INT).contains(&input.cooking_time) {
        return Err(ValidationError::new(
            "cooking_time",
            format!("Cooking time must be between 1 and {}", MAX_SMALL_INT),
        ));
    }

    if input.ingredients.is_empty() {
        return Err(ValidationError::new(
            "ingredients",
            "A recipe needs at least one ingredient",
        ));
    }
    let mut seen = HashSet::new();
    for ingredient in input.ingredients {
        if !(1..=MAX_SMALL_INT).contains(&ingredient.amount) {
            return Err(ValidationError::new(
                "ingredients",
                format!("Ingredient amount must be between 1 and {}", MAX_SMALL_INT),
            ));
        }
        if !seen.insert(ingredient.id) {
            return Err(ValidationError::new(
                "ingredients",
                "Each ingredient may appear only once",
            ));
        }
    }

    if input.tags.is_empty() {
        return Err(ValidationError::new("tags", "A recipe needs at least one tag"));
    }
    let mut seen = HashSet::new();
    let tags = input
        .tags
        .iter()
        .copied()
        .filter(|tag| seen.insert(*tag))
        .collect();

    Ok(tags)
}
