//! End-to-end order flow over the HTTP surface
//!
//! Builds the full router on an in-memory database and drives it with
//! `tower::ServiceExt::oneshot`.

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use order_server::auth::JwtConfig;
use order_server::db::DbService;
use order_server::db::repository::{category, menu_item, menu_item_option, user};
use order_server::{Config, ServerState, api};
use shared::models::{CategoryCreate, MenuItemCreate, MenuItemOptionCreate};

fn test_config() -> Config {
    Config {
        http_port: 0,
        database_path: ":memory:".to_string(),
        environment: "development".to_string(),
        allowed_origins: vec![],
        log_dir: None,
        jwt: JwtConfig {
            secret: "integration-test-signing-key-with-length".to_string(),
            expiration_minutes: 60,
            issuer: "order-server".to_string(),
        },
    }
}

struct TestApp {
    app: Router,
    pizza_id: i64,
    large_id: i64,
}

/// Seeded catalog: one category, a pizza at 8.00 with a +1.50 "Large"
/// option, plus a waiter (staff) and a boss (manager) account, both
/// with the password `hunter2!`.
async fn spawn_app() -> TestApp {
    let db = DbService::open_in_memory().await.unwrap();
    let pool = db.pool.clone();

    let cat = category::create(
        &pool,
        CategoryCreate {
            name: "Mains".to_string(),
            description: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let pizza = menu_item::create(
        &pool,
        MenuItemCreate {
            category_id: Some(cat.id),
            name: "Margherita".to_string(),
            description: None,
            base_price: "8.00".parse::<Decimal>().unwrap(),
            image_url: None,
            is_available: Some(true),
        },
    )
    .await
    .unwrap();

    let large = menu_item_option::create(
        &pool,
        pizza.id,
        MenuItemOptionCreate {
            group_name: "Size".to_string(),
            name: "Large".to_string(),
            additional_price: "1.50".parse::<Decimal>().unwrap(),
        },
    )
    .await
    .unwrap();

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(b"hunter2!", &salt)
        .unwrap()
        .to_string();
    user::create(&pool, "waiter", &hash, "staff").await.unwrap();
    user::create(&pool, "boss", &hash, "manager").await.unwrap();

    let state = ServerState::with_db(test_config(), db);
    TestApp {
        app: api::build_app(state),
        pizza_id: pizza.id,
        large_id: large.id,
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn login_as(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"username": username, "password": "hunter2!"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["token"].as_str().unwrap().to_string()
}

async fn login(app: &Router) -> String {
    login_as(app, "waiter").await
}

#[tokio::test]
async fn order_is_created_and_priced_server_side() {
    let t = spawn_app().await;

    // the client-supplied price must be ignored
    let response = t
        .app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            json!({
                "table_number": 5,
                "items": [{
                    "item_id": t.pizza_id,
                    "quantity": 2,
                    "chosen_options": [{"option_id": t.large_id}],
                    "price": "0.01"
                }]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["status"], "pending_approval");
    assert_eq!(body["total_amount"], "19.00");
    assert_eq!(body["items"][0]["sub_total"], "19.00");
}

#[tokio::test]
async fn unknown_menu_item_is_a_404() {
    let t = spawn_app().await;

    let response = t
        .app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            json!({"table_number": 1, "items": [{"item_id": 999, "quantity": 1}]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], "E0003");
}

#[tokio::test]
async fn order_reads_require_authentication() {
    let t = spawn_app().await;

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["code"], "E3001");
}

#[tokio::test]
async fn staff_can_walk_an_order_through_approval() {
    let t = spawn_app().await;
    let token = login(&t.app).await;

    let created = t
        .app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            json!({"table_number": 2, "items": [{"item_id": t.pizza_id, "quantity": 1}]}),
        ))
        .await
        .unwrap();
    let order_id = json_body(created).await["id"].as_i64().unwrap();

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/orders/{order_id}/status"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"status": "approved"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "approved");
}

#[tokio::test]
async fn unknown_status_string_lists_the_accepted_values() {
    let t = spawn_app().await;
    let token = login(&t.app).await;

    let created = t
        .app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            json!({"table_number": 2, "items": [{"item_id": t.pizza_id, "quantity": 1}]}),
        ))
        .await
        .unwrap();
    let order_id = json_body(created).await["id"].as_i64().unwrap();

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/orders/{order_id}/status"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"status": "shipped"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "E0002");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("pending_approval"), "got: {message}");
    assert!(message.contains("cancelled"), "got: {message}");
}

#[tokio::test]
async fn skipped_transition_is_a_422() {
    let t = spawn_app().await;
    let token = login(&t.app).await;

    let created = t
        .app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            json!({"table_number": 2, "items": [{"item_id": t.pizza_id, "quantity": 1}]}),
        ))
        .await
        .unwrap();
    let order_id = json_body(created).await["id"].as_i64().unwrap();

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/orders/{order_id}/status"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"status": "ready"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["code"], "E0005");
}

#[tokio::test]
async fn staff_cannot_write_the_catalog() {
    let t = spawn_app().await;
    let token = login(&t.app).await;

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/categories")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"name": "Specials"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["code"], "E2001");
}

#[tokio::test]
async fn duplicate_option_in_a_group_is_a_conflict() {
    let t = spawn_app().await;
    let token = login_as(&t.app, "boss").await;

    // Size/Large already exists on the pizza
    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/menu-items/{}/options", t.pizza_id))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "group_name": "Size",
                        "name": "Large",
                        "additional_price": "2.00"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(response).await["code"], "E0004");
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let t = spawn_app().await;

    let response = t
        .app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"username": "waiter", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "Invalid username or password"
    );
}

#[tokio::test]
async fn unknown_username_gets_the_same_error_as_wrong_password() {
    let t = spawn_app().await;

    let response = t
        .app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"username": "nobody", "password": "hunter2!"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "Invalid username or password"
    );
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let t = spawn_app().await;

    let response = t
        .app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}
