pub mod auth;
pub mod error;
pub mod ingredients;
pub mod pagination;
pub mod photos;
pub mod projections;
pub mod recipes;
pub mod tags;
pub mod users;

pub use error::ApiError;

use serde::Serialize;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

use crate::models::{Ingredient, Tag};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Request field the error refers to, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "larder", description = "Recipe sharing API"),
        components(schemas(ErrorResponse, Ingredient, Tag))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Clients send `Authorization: Token <key>`
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "token_auth",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Token <key> as returned by /api/auth/token/login",
            ))),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        auth::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        tags::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        photos::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_contains_every_module() {
        let spec = openapi();
        for path in [
            "/api/auth/token/login",
            "/api/users",
            "/api/users/{id}/subscribe",
            "/api/tags",
            "/api/ingredients",
            "/api/recipes",
            "/api/recipes/{id}/favorite",
            "/api/recipes/{id}/shopping_cart",
            "/api/recipes/download_shopping_cart",
            "/api/photos/{id}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_error_response_omits_missing_field() {
        let json = serde_json::to_value(ErrorResponse {
            error: "nope".to_string(),
            field: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"error": "nope"}));
    }
}
