//! End-to-end checks of the pieces a request passes through before it
//! reaches the database: query parsing, paging, body validation and the
//! shopping-list rendering that comes out the other side.

use larder_core::{
    decode_data_uri, page_link, render_shopping_list, validate_recipe, validate_username,
    IngredientAmount, PageRequest, RecipeFilters, RecipeInput, ShoppingListLine, MAX_SMALL_INT,
};

fn pairs(query: &[(&str, &str)]) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_recipe_list_query_to_page_links() {
    let filters = RecipeFilters::<u64>::from_pairs(&pairs(&[
        ("tags", "breakfast"),
        ("tags", "lunch"),
        ("is_favorited", "1"),
        ("page", "2"),
        ("limit", "2"),
    ]))
    .unwrap();

    assert_eq!(filters.tags, vec!["breakfast", "lunch"]);
    assert!(filters.is_favorited);
    assert!(!filters.is_in_shopping_cart);

    let page = PageRequest::from_params(filters.page, filters.limit, 6, 100).unwrap();
    assert_eq!(page.offset(), 2);

    // 5 matching recipes: page 2 of size 2 has both neighbours
    assert!(page.has_next(5));
    assert!(page.has_previous());
    assert_eq!(
        page_link("/api/recipes", Some("tags=breakfast&page=2&limit=2"), 3),
        "/api/recipes?tags=breakfast&limit=2&page=3"
    );
}

#[test]
fn test_limit_is_clamped_to_maximum() {
    let page = PageRequest::from_params(None, Some(1000), 6, 100).unwrap();
    assert_eq!(page.limit, 100);
}

#[test]
fn test_invalid_author_is_rejected() {
    let err = RecipeFilters::<u64>::from_pairs(&pairs(&[("author", "abc")])).unwrap_err();
    assert_eq!(err.field, Some("author"));
}

#[test]
fn test_recipe_body_boundaries() {
    let ingredients = [IngredientAmount {
        id: 1u32,
        amount: MAX_SMALL_INT,
    }];
    let tags = [7u32, 7, 8];
    let input = RecipeInput {
        name: "Stew",
        text: "Simmer for hours.",
        cooking_time: 1,
        ingredients: &ingredients,
        tags: &tags,
    };
    assert_eq!(validate_recipe(&input).unwrap(), vec![7, 8]);

    let too_much = [IngredientAmount {
        id: 1u32,
        amount: MAX_SMALL_INT + 1,
    }];
    let err = validate_recipe(&RecipeInput {
        ingredients: &too_much,
        ..input.clone()
    })
    .unwrap_err();
    assert_eq!(err.field, Some("ingredients"));

    let err = validate_recipe(&RecipeInput {
        cooking_time: 0,
        ..input
    })
    .unwrap_err();
    assert_eq!(err.field, Some("cooking_time"));
}

#[test]
fn test_reserved_username() {
    assert!(validate_username("Me").is_err());
    assert!(validate_username("meal.prepper").is_ok());
}

#[test]
fn test_data_uri_requires_image_prefix() {
    assert!(decode_data_uri("data:text/plain;base64,aGVsbG8=").is_err());
}

#[test]
fn test_shopping_list_document() {
    let doc = render_shopping_list(&[
        ShoppingListLine {
            name: "flour".to_string(),
            measurement_unit: "g".to_string(),
            total: 500,
        },
        ShoppingListLine {
            name: "milk".to_string(),
            measurement_unit: "ml".to_string(),
            total: 250,
        },
    ]);

    assert!(doc.contains("1. flour (g) - 500\n"));
    assert!(doc.contains("2. milk (ml) - 250\n"));
}
