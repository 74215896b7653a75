//! HTTP-level tests against a real PostgreSQL database.
//!
//! Set `TEST_DATABASE_URL` to run them; without it every test returns early.
//! Each test creates its own users, tags and ingredients with random names so
//! the suite can run in parallel against a shared database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use diesel::prelude::*;
use larder_server::config::Config;
use larder_server::db::{create_pool, DbPool};
use larder_server::models::{NewIngredient, NewTag};
use larder_server::schema::{favorites, ingredients, recipes, shopping_cart_items, tags};
use larder_server::{app, AppState};
use serde_json::{json, Value};
use std::sync::OnceLock;
use tower::ServiceExt;
use uuid::Uuid;

// 1x1 transparent PNG
const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

static POOL: OnceLock<Option<(String, DbPool)>> = OnceLock::new();

struct TestApp {
    router: Router,
    pool: DbPool,
}

impl TestApp {
    fn new() -> Option<Self> {
        let (url, pool) = POOL
            .get_or_init(|| {
                let url = std::env::var("TEST_DATABASE_URL").ok()?;
                let pool = create_pool(&url).expect("failed to set up test database");
                Some((url, pool))
            })
            .clone()?;

        let state = AppState::new(pool.clone(), Config::with_database_url(url));
        Some(Self {
            router: app(state),
            pool,
        })
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, bytes.to_vec())
    }

    async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, bytes) = self.send(method, uri, token, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Register a user and log in. Returns (user id, token).
    async fn signup(&self) -> (String, String) {
        let suffix = &Uuid::new_v4().simple().to_string()[..12];
        let email = format!("cook-{}@example.com", suffix);
        let password = "correct horse battery";

        let (status, user) = self
            .json(
                Method::POST,
                "/api/users",
                None,
                Some(json!({
                    "email": email,
                    "username": format!("cook_{}", suffix),
                    "first_name": "Test",
                    "last_name": "Cook",
                    "password": password,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", user);

        let (status, login) = self
            .json(
                Method::POST,
                "/api/auth/token/login",
                None,
                Some(json!({"email": email, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", login);

        (
            user["id"].as_str().unwrap().to_string(),
            login["auth_token"].as_str().unwrap().to_string(),
        )
    }

    fn seed_tag(&self) -> (Uuid, String) {
        let suffix = Uuid::new_v4().simple().to_string();
        let slug = format!("tag-{}", &suffix[..12]);
        let mut conn = self.pool.get().unwrap();
        let id = diesel::insert_into(tags::table)
            .values(NewTag {
                name: &slug,
                color: &format!("#{}", &suffix[..6]),
                slug: &slug,
            })
            .returning(tags::id)
            .get_result(&mut conn)
            .unwrap();
        (id, slug)
    }

    fn seed_ingredient(&self, name: &str, unit: &str) -> Uuid {
        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(ingredients::table)
            .values(NewIngredient {
                name,
                measurement_unit: unit,
            })
            .returning(ingredients::id)
            .get_result(&mut conn)
            .unwrap()
    }

    async fn create_recipe(&self, token: &str, ingredients: Value, tags: Value) -> Value {
        let (status, recipe) = self
            .json(
                Method::POST,
                "/api/recipes",
                Some(token),
                Some(json!({
                    "name": "Test bake",
                    "text": "Mix everything and bake.",
                    "cooking_time": 30,
                    "image": PNG_DATA_URI,
                    "ingredients": ingredients,
                    "tags": tags,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", recipe);
        recipe
    }
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

#[tokio::test]
async fn test_signup_login_and_me() {
    let Some(app) = TestApp::new() else { return };
    let (id, token) = app.signup().await;

    let (status, me) = app.json(Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], id);
    assert_eq!(me["is_subscribed"], false);
    assert!(me.get("password_hash").is_none());

    let (status, _) = app.json(Method::GET, "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .json(Method::POST, "/api/auth/token/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.json(Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reserved_username_rejected() {
    let Some(app) = TestApp::new() else { return };

    let (status, body) = app
        .json(
            Method::POST,
            "/api/users",
            None,
            Some(json!({
                "email": format!("{}@example.com", unique("me")),
                "username": "me",
                "first_name": "Me",
                "last_name": "Myself",
                "password": "correct horse battery",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "username");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let Some(app) = TestApp::new() else { return };

    let (status, body) = app
        .json(
            Method::POST,
            "/api/users",
            None,
            Some(json!({"email": "missing-everything-else@example.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_anonymous_sees_false_flags_and_cannot_mutate() {
    let Some(app) = TestApp::new() else { return };
    let (_, token) = app.signup().await;
    let flour = app.seed_ingredient(&unique("flour"), "g");
    let (tag, _) = app.seed_tag();

    let recipe = app
        .create_recipe(&token, json!([{"id": flour, "amount": 100}]), json!([tag]))
        .await;
    let recipe_id = recipe["id"].as_str().unwrap();

    let (status, _) = app
        .json(
            Method::POST,
            &format!("/api/recipes/{}/favorite", recipe_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, mine) = app
        .json(Method::GET, &format!("/api/recipes/{}", recipe_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["is_favorited"], true);

    let (status, anon) = app
        .json(Method::GET, &format!("/api/recipes/{}", recipe_id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(anon["is_favorited"], false);
    assert_eq!(anon["is_in_shopping_cart"], false);

    let (status, _) = app
        .json(
            Method::POST,
            &format!("/api/recipes/{}/shopping_cart", recipe_id),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The stored image is served back with its content type
    let image_url = anon["image"].as_str().unwrap();
    let (status, headers, bytes) = app.send(Method::GET, image_url, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[tokio::test]
async fn test_duplicate_favorite_keeps_one_row() {
    let Some(app) = TestApp::new() else { return };
    let (user_id, token) = app.signup().await;
    let flour = app.seed_ingredient(&unique("flour"), "g");
    let (tag, _) = app.seed_tag();

    let recipe = app
        .create_recipe(&token, json!([{"id": flour, "amount": 100}]), json!([tag]))
        .await;
    let recipe_id = recipe["id"].as_str().unwrap();
    let uri = format!("/api/recipes/{}/favorite", recipe_id);

    let (status, short) = app.json(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(short["id"], recipe_id);
    assert_eq!(short["cooking_time"], 30);

    let (status, _) = app.json(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let user_id: Uuid = user_id.parse().unwrap();
    let recipe_uuid: Uuid = recipe_id.parse().unwrap();
    let mut conn = app.pool.get().unwrap();
    let rows: i64 = favorites::table
        .filter(favorites::user_id.eq(user_id))
        .filter(favorites::recipe_id.eq(recipe_uuid))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(rows, 1);

    let (status, _) = app.json(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.json(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_follow_rules() {
    let Some(app) = TestApp::new() else { return };
    let (me, token) = app.signup().await;
    let (author, author_token) = app.signup().await;

    let flour = app.seed_ingredient(&unique("flour"), "g");
    let (tag, _) = app.seed_tag();
    for _ in 0..3 {
        app.create_recipe(
            &author_token,
            json!([{"id": flour, "amount": 50}]),
            json!([tag]),
        )
        .await;
    }

    let (status, _) = app
        .json(
            Method::POST,
            &format!("/api/users/{}/subscribe", me),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let subscribe = format!("/api/users/{}/subscribe?recipes_limit=2", author);
    let (status, body) = app.json(Method::POST, &subscribe, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 3);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 2);

    let (status, _) = app.json(Method::POST, &subscribe, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, author_view) = app
        .json(Method::GET, &format!("/api/users/{}", author), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(author_view["is_subscribed"], true);

    let (status, list) = app
        .json(
            Method::GET,
            "/api/users/subscriptions?recipes_limit=1",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 1);
    assert_eq!(list["results"][0]["id"], author.as_str());
    assert_eq!(list["results"][0]["recipes"].as_array().unwrap().len(), 1);

    let unsubscribe = format!("/api/users/{}/subscribe", author);
    let (status, _) = app.json(Method::DELETE, &unsubscribe, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.json(Method::DELETE, &unsubscribe, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shopping_list_sums_amounts() {
    let Some(app) = TestApp::new() else { return };
    let (_, token) = app.signup().await;
    let flour_name = unique("flour");
    let flour = app.seed_ingredient(&flour_name, "g");
    let eggs_name = unique("eggs");
    let eggs = app.seed_ingredient(&eggs_name, "pcs");
    let (tag, _) = app.seed_tag();

    let first = app
        .create_recipe(
            &token,
            json!([{"id": flour, "amount": 200}, {"id": eggs, "amount": 2}]),
            json!([tag]),
        )
        .await;
    let second = app
        .create_recipe(&token, json!([{"id": flour, "amount": 300}]), json!([tag]))
        .await;

    for recipe in [&first, &second] {
        let (status, _) = app
            .json(
                Method::POST,
                &format!("/api/recipes/{}/shopping_cart", recipe["id"].as_str().unwrap()),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, headers, bytes) = app
        .send(
            Method::GET,
            "/api/recipes/download_shopping_cart",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("shopping_list.txt"));

    let document = String::from_utf8(bytes).unwrap();
    assert!(document.contains(&format!("{} (g) - 500", flour_name)), "{}", document);
    assert!(document.contains(&format!("{} (pcs) - 2", eggs_name)), "{}", document);

    let (status, cart) = app
        .json(
            Method::GET,
            "/api/recipes?is_in_shopping_cart=1",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["count"], 2);
}

#[tokio::test]
async fn test_update_replaces_tags_and_checks_author() {
    let Some(app) = TestApp::new() else { return };
    let (_, token) = app.signup().await;
    let (_, other_token) = app.signup().await;
    let flour = app.seed_ingredient(&unique("flour"), "g");
    let (breakfast, _) = app.seed_tag();
    let (dinner, dinner_slug) = app.seed_tag();

    let recipe = app
        .create_recipe(&token, json!([{"id": flour, "amount": 100}]), json!([breakfast]))
        .await;
    let uri = format!("/api/recipes/{}", recipe["id"].as_str().unwrap());
    let body = json!({
        "name": "Renamed bake",
        "text": "Now for dinner.",
        "cooking_time": 45,
        "ingredients": [{"id": flour, "amount": 150}],
        "tags": [dinner, dinner],
    });

    let (status, _) = app
        .json(Method::PATCH, &uri, Some(&other_token), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app.json(Method::PATCH, &uri, Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{}", updated);
    assert_eq!(updated["name"], "Renamed bake");
    let tags = updated["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["slug"], dinner_slug.as_str());
    assert_eq!(updated["ingredients"][0]["amount"], 150);
    // Image kept when omitted
    assert_eq!(updated["image"], recipe["image"]);

    let (status, filtered) = app
        .json(
            Method::GET,
            &format!("/api/recipes?tags={}", dinner_slug),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered["count"], 1);
}

#[tokio::test]
async fn test_unknown_ingredient_rolls_back() {
    let Some(app) = TestApp::new() else { return };
    let (user_id, token) = app.signup().await;
    let (tag, _) = app.seed_tag();

    let (status, _) = app
        .json(
            Method::POST,
            "/api/recipes",
            Some(&token),
            Some(json!({
                "name": "Ghost stew",
                "text": "Uses an ingredient that does not exist.",
                "cooking_time": 10,
                "image": PNG_DATA_URI,
                "ingredients": [{"id": Uuid::new_v4(), "amount": 1}],
                "tags": [tag],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let user_id: Uuid = user_id.parse().unwrap();
    let mut conn = app.pool.get().unwrap();
    let count: i64 = recipes::table
        .filter(recipes::author_id.eq(user_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_delete_recipe_cascades() {
    let Some(app) = TestApp::new() else { return };
    let (_, token) = app.signup().await;
    let (_, other_token) = app.signup().await;
    let flour = app.seed_ingredient(&unique("flour"), "g");
    let (tag, _) = app.seed_tag();

    let recipe = app
        .create_recipe(&token, json!([{"id": flour, "amount": 100}]), json!([tag]))
        .await;
    let recipe_id = recipe["id"].as_str().unwrap();

    let (status, _) = app
        .json(
            Method::POST,
            &format!("/api/recipes/{}/favorite", recipe_id),
            Some(&other_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/recipes/{}", recipe_id);
    let (status, _) = app.json(Method::DELETE, &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.json(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.json(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .send(Method::GET, recipe["image"].as_str().unwrap(), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let recipe_uuid: Uuid = recipe_id.parse().unwrap();
    let mut conn = app.pool.get().unwrap();
    let favorites_left: i64 = favorites::table
        .filter(favorites::recipe_id.eq(recipe_uuid))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(favorites_left, 0);
}

#[tokio::test]
async fn test_ingredient_prefix_search() {
    let Some(app) = TestApp::new() else { return };
    let prefix = unique("Saffron");
    app.seed_ingredient(&format!("{} threads", prefix), "g");

    let (status, found) = app
        .json(
            Method::GET,
            &format!("/api/ingredients?name={}", prefix.to_lowercase()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["measurement_unit"], "g");
}

#[tokio::test]
async fn test_page_past_end_is_not_found() {
    let Some(app) = TestApp::new() else { return };

    let (status, _) = app
        .json(Method::GET, "/api/users?page=1000000", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_huge_page_number_is_not_found() {
    let Some(app) = TestApp::new() else { return };

    let (status, _) = app
        .json(
            Method::GET,
            &format!("/api/recipes?page={}", i64::MAX),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipe_accepts_multi_megabyte_image() {
    let Some(app) = TestApp::new() else { return };
    let (_, token) = app.signup().await;
    let flour = app.seed_ingredient(&unique("flour"), "g");
    let (tag, _) = app.seed_tag();

    // PNG signature padded out to 3 MiB; only the format is sniffed
    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png.resize(3 * 1024 * 1024, 0);
    let image = format!("data:image/png;base64,{}", BASE64.encode(&png));

    let (status, recipe) = app
        .json(
            Method::POST,
            "/api/recipes",
            Some(&token),
            Some(json!({
                "name": "Big picture bake",
                "text": "Photographed in great detail.",
                "cooking_time": 20,
                "image": image,
                "ingredients": [{"id": flour, "amount": 100}],
                "tags": [tag],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", recipe);

    let (status, _, bytes) = app
        .send(Method::GET, recipe["image"].as_str().unwrap(), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes.len(), png.len());
}

#[tokio::test]
async fn test_set_password() {
    let Some(app) = TestApp::new() else { return };
    let (_, token) = app.signup().await;
    let (_, me) = app.json(Method::GET, "/api/users/me", Some(&token), None).await;
    let email = me["email"].as_str().unwrap().to_string();

    let (status, body) = app
        .json(
            Method::POST,
            "/api/users/set_password",
            Some(&token),
            Some(json!({
                "current_password": "not my password",
                "new_password": "a brand new secret",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "current_password");

    let (status, body) = app
        .json(
            Method::POST,
            "/api/users/set_password",
            Some(&token),
            Some(json!({
                "current_password": "correct horse battery",
                "new_password": "correct horse battery",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "new_password");

    let (status, _) = app
        .json(
            Method::POST,
            "/api/users/set_password",
            None,
            Some(json!({
                "current_password": "correct horse battery",
                "new_password": "a brand new secret",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .json(
            Method::POST,
            "/api/users/set_password",
            Some(&token),
            Some(json!({
                "current_password": "correct horse battery",
                "new_password": "a brand new secret",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .json(
            Method::POST,
            "/api/auth/token/login",
            None,
            Some(json!({"email": email, "password": "correct horse battery"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, login) = app
        .json(
            Method::POST,
            "/api/auth/token/login",
            None,
            Some(json!({"email": email, "password": "a brand new secret"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", login);
    assert!(login["auth_token"].is_string());
}

#[tokio::test]
async fn test_duplicate_cart_item_keeps_one_row() {
    let Some(app) = TestApp::new() else { return };
    let (user_id, token) = app.signup().await;
    let flour = app.seed_ingredient(&unique("flour"), "g");
    let (tag, _) = app.seed_tag();

    let recipe = app
        .create_recipe(&token, json!([{"id": flour, "amount": 100}]), json!([tag]))
        .await;
    let recipe_id = recipe["id"].as_str().unwrap();
    let uri = format!("/api/recipes/{}/shopping_cart", recipe_id);

    let (status, short) = app.json(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(short["id"], recipe_id);

    let (status, _) = app.json(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let user_id: Uuid = user_id.parse().unwrap();
    let recipe_uuid: Uuid = recipe_id.parse().unwrap();
    let mut conn = app.pool.get().unwrap();
    let rows: i64 = shopping_cart_items::table
        .filter(shopping_cart_items::user_id.eq(user_id))
        .filter(shopping_cart_items::recipe_id.eq(recipe_uuid))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(rows, 1);

    let (status, _) = app.json(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.json(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_checks_recipe_before_body() {
    let Some(app) = TestApp::new() else { return };
    let (_, token) = app.signup().await;
    let (_, other_token) = app.signup().await;
    let flour = app.seed_ingredient(&unique("flour"), "g");
    let (tag, _) = app.seed_tag();

    let (status, _) = app
        .json(
            Method::PATCH,
            &format!("/api/recipes/{}", Uuid::new_v4()),
            Some(&token),
            Some(json!({"name": ""})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let recipe = app
        .create_recipe(&token, json!([{"id": flour, "amount": 100}]), json!([tag]))
        .await;
    let uri = format!("/api/recipes/{}", recipe["id"].as_str().unwrap());

    // A stranger is refused before their body is looked at
    let (status, _) = app
        .json(Method::PATCH, &uri, Some(&other_token), Some(json!({"name": ""})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .json(Method::PATCH, &uri, Some(&token), Some(json!({"name": ""})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, unchanged) = app.json(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["name"], "Test bake");
}
