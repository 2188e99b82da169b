//! Handler tests for Products domain
//!
//! These drive the products router over the in-memory repository:
//! - validation chains and their aggregated `{errors}` bodies
//! - response envelopes and status codes
//! - not-found messages per operation
//!
//! The PostgreSQL-backed equivalents live in `integration_test.rs`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use test_utils::assertions::assert_ascending;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> (Router, InMemoryProductRepository) {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo.clone());
    (handlers::router(service), repo)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let body = match body {
        Some(value) => Body::from(serde_json::to_string(&value).unwrap()),
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

fn messages(body: &Value) -> Vec<&str> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect()
}

async fn seed(repo: &InMemoryProductRepository, name: &str, price: f64) -> Product {
    repo.create(CreateProduct {
        name: name.to_string(),
        price,
        availability: None,
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_create_without_fields_reports_four_errors() {
    let (app, repo) = app();

    let (status, body) = send(&app, "POST", "/", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec![
            "El nombre de producto no puede ir vacío",
            "Valor no valido",
            "El precio de producto no puede ir vacío",
            "Precio no válido",
        ]
    );
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_empty_body_reports_missing_fields() {
    let (app, _) = app();

    let (status, body) = send(&app, "POST", "/", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_with_non_positive_price_reports_one_error() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({"name": "Monitor", "price": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Precio no válido"]);
    assert_eq!(body["errors"][0]["path"], "price");
    assert_eq!(body["errors"][0]["location"], "body");
    assert_eq!(body["errors"][0]["type"], "field");
    assert_eq!(body["errors"][0]["value"], 0);
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({"name": "Tablet - Testing", "price": 4000})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Tablet - Testing");
    assert_eq!(body["data"]["price"], 4000.0);
    assert_eq!(body["data"]["availability"], true);
    assert!(body["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_honors_explicit_availability() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({"name": "Mouse", "price": "25.5", "availability": false})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["price"], 25.5);
    assert_eq!(body["data"]["availability"], false);
}

#[tokio::test]
async fn test_create_accepts_price_written_with_exponent() {
    let (app, _) = app();

    let (status, body) = send(&app, "POST", "/", Some(json!({"name": "X", "price": 1e16}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["price"], 1e16);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_products_ordered_by_price() {
    let (app, repo) = app();
    let builder = TestDataBuilder::from_test_name("handler_list_order");

    seed(&repo, &builder.name("product", "a"), 900.0).await;
    seed(&repo, &builder.name("product", "b"), builder.price()).await;
    seed(&repo, &builder.name("product", "c"), 15.0).await;

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    let products: Vec<Product> = serde_json::from_value(body["data"].clone()).unwrap();
    assert_eq!(products.len(), 3);

    let prices: Vec<f64> = products.iter().map(|p| p.price).collect();
    assert_ascending(&prices, "list");
}

#[tokio::test]
async fn test_list_empty_returns_empty_data() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": []}));
}

#[tokio::test]
async fn test_get_product_returns_data() {
    let (app, repo) = app();
    let created = seed(&repo, "Monitor", 300.0).await;

    let (status, body) = send(&app, "GET", &format!("/{}", created.id), None).await;

    assert_eq!(status, StatusCode::OK);
    let product: Product = serde_json::from_value(body["data"].clone()).unwrap();
    assert_eq!(product, created);
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let (app, repo) = app();
    seed(&repo, "Monitor", 300.0).await;

    let (status, body) = send(&app, "GET", "/2000", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Producto no encontrado"}));
}

#[tokio::test]
async fn test_get_with_invalid_id_reports_one_error() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/no-valid-url", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["ID no válido"]);
    assert_eq!(body["errors"][0]["location"], "params");
    assert_eq!(body["errors"][0]["value"], "no-valid-url");
}

#[tokio::test]
async fn test_update_product_overwrites_fields() {
    let (app, repo) = app();
    let created = seed(&repo, "Monitor", 300.0).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{}", created.id),
        Some(json!({"name": "Monitor curvo", "price": 350, "availability": false})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], created.id);
    assert_eq!(body["data"]["name"], "Monitor curvo");
    assert_eq!(body["data"]["price"], 350.0);
    assert_eq!(body["data"]["availability"], false);
}

#[tokio::test]
async fn test_update_with_negative_price_reports_one_error() {
    let (app, repo) = app();
    let created = seed(&repo, "Monitor", 300.0).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{}", created.id),
        Some(json!({"name": "Monitor", "price": -1000, "availability": true})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Precio no válido"]);

    let unchanged = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(unchanged.price, 300.0);
}

#[tokio::test]
async fn test_update_with_invalid_availability() {
    let (app, repo) = app();
    let created = seed(&repo, "Monitor", 300.0).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{}", created.id),
        Some(json!({"name": "Monitor", "price": 300, "availability": "maybe"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["valor para disponibilidad no válido"]);
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "PUT",
        "/2000",
        Some(json!({"name": "Monitor", "price": 300, "availability": true})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "No se encontro el producto"}));
}

#[tokio::test]
async fn test_toggle_availability_flips_each_call() {
    let (app, repo) = app();
    let created = seed(&repo, "Monitor", 300.0).await;
    let uri = format!("/{}", created.id);

    let (status, body) = send(&app, "PATCH", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], false);
    assert_eq!(body["data"]["name"], "Monitor");
    assert_eq!(body["data"]["price"], 300.0);

    let (_, body) = send(&app, "PATCH", &uri, None).await;
    assert_eq!(body["data"]["availability"], true);
}

#[tokio::test]
async fn test_toggle_missing_product_returns_404() {
    let (app, _) = app();

    let (status, body) = send(&app, "PATCH", "/2000", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "No se encontro el producto"}));
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let (app, repo) = app();
    let created = seed(&repo, "Monitor", 300.0).await;
    let uri = format!("/{}", created.id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": "Producto eliminado"}));

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Producto no encontrado"}));
}

#[tokio::test]
async fn test_delete_missing_product_returns_404() {
    let (app, _) = app();

    let (status, body) = send(&app, "DELETE", "/2000", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "No se encontro el producto"}));
}

#[tokio::test]
async fn test_ids_restart_after_reset() {
    let (app, repo) = app();
    seed(&repo, "Monitor", 300.0).await;
    seed(&repo, "Mouse", 20.0).await;

    repo.reset().await;

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({"name": "Teclado", "price": 50})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1);
}
