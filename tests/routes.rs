#![cfg(feature = "server")]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use iebank::api::{app_router, AppState};
use iebank::{open_database, AccountService};
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_test_router() -> Router {
    let conn = open_database(":memory:").unwrap();
    app_router(AppState::new(AccountService::new(conn)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, name: &str, currency: &str, country: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/accounts",
        Some(json!({ "name": name, "currency": currency, "country": country })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn get_accounts_on_empty_store() {
    let app = build_test_router();

    let (status, body) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "accounts": [] }));
}

#[tokio::test]
async fn wrong_path_is_not_found() {
    let app = build_test_router();

    let (status, body) = send(&app, Method::GET, "/wrong_path", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_account_returns_full_record() {
    let app = build_test_router();

    let body = create(&app, "farah m o", "€", "Palestine").await;
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], "farah m o");
    assert_eq!(body["currency"], "€");
    assert_eq!(body["country"], "Palestine");
    assert_eq!(body["balance"], 0.0);
    assert_eq!(body["status"], "Active");
    assert_eq!(body["account_number"].as_str().unwrap().len(), 20);
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn list_keeps_insertion_order() {
    let app = build_test_router();
    create(&app, "farah m o", "€", "Palestine").await;
    create(&app, "Farah o", "€", "Palestine").await;
    create(&app, "Farah Orfaly", "€", "Palestine").await;

    let (status, body) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(status, StatusCode::OK);

    let accounts = body["accounts"].as_array().unwrap();
    assert!(accounts.len() >= 2);
    assert_eq!(accounts[1]["name"], "Farah o");
    assert_eq!(accounts[2]["name"], "Farah Orfaly");
}

#[tokio::test]
async fn get_specific_account() {
    let app = build_test_router();
    let created = create(&app, "farah orfaly", "$", "farance").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "farah orfaly");
    assert_eq!(body["currency"], "$");
    assert_eq!(body["country"], "farance");
    assert_eq!(body, created);
}

#[tokio::test]
async fn update_account_changes_only_supplied_fields() {
    let app = build_test_router();
    let created = create(&app, "Alice", "$", "USA").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/accounts/{}", id),
        Some(json!({ "name": "Alice Updated" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice Updated");
    assert_eq!(body["currency"], "$");
    assert_eq!(body["country"], "USA");
    assert_eq!(body["account_number"], created["account_number"]);

    let (_, fetched) = send(&app, Method::GET, &format!("/accounts/{}", id), None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn update_ignores_immutable_fields() {
    let app = build_test_router();
    let created = create(&app, "Alice", "$", "USA").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/accounts/{}", id),
        Some(json!({ "id": 12345, "account_number": "1", "balance": 42.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["account_number"], created["account_number"]);
    assert_eq!(body["balance"], 42.5);
}

#[tokio::test]
async fn update_with_invalid_field_is_bad_request() {
    let app = build_test_router();
    let created = create(&app, "Alice", "$", "USA").await;
    let uri = format!("/accounts/{}", created["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "name");

    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_unknown_id_with_invalid_field_is_not_found() {
    let app = build_test_router();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/accounts/999999",
        Some(json!({ "currency": "DOLLARS" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unsupported_method_returns_json_error() {
    let app = build_test_router();

    let (status, body) = send(&app, Method::POST, "/accounts/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "method not allowed");

    let (status, body) = send(&app, Method::DELETE, "/accounts", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_with_overlong_country_is_bad_request() {
    let app = build_test_router();

    let (status, body) = send(
        &app,
        Method::POST,
        "/accounts",
        Some(json!({ "name": "Alice", "currency": "$", "country": "x".repeat(100_000) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "country");
}

#[tokio::test]
async fn delete_account_then_not_found() {
    let app = build_test_router();
    let created = create(&app, "David", "€", "Italy").await;
    let uri = format!("/accounts/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(list, json!({ "accounts": [] }));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = build_test_router();

    let (status, _) = send(&app, Method::GET, "/accounts/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/accounts/999999",
        Some(json!({ "name": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/accounts/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_not_found() {
    let app = build_test_router();

    let (status, _) = send(&app, Method::DELETE, "/accounts/nonexistent_id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/accounts/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_missing_field_is_bad_request() {
    let app = build_test_router();

    let (status, body) = send(
        &app,
        Method::POST,
        "/accounts",
        Some(json!({ "name": "farah", "currency": "$" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, list) = send(&app, Method::GET, "/accounts", None).await;
    assert_eq!(list["accounts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_with_blank_name_reports_field() {
    let app = build_test_router();

    let (status, body) = send(
        &app,
        Method::POST,
        "/accounts",
        Some(json!({ "name": "   ", "currency": "$", "country": "USA" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "name");
}

#[tokio::test]
async fn create_with_malformed_json_is_bad_request() {
    let app = build_test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/accounts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let app = build_test_router();
    let first = create(&app, "First", "$", "USA").await;
    send(&app, Method::DELETE, &format!("/accounts/{}", first["id"]), None).await;

    let second = create(&app, "Second", "$", "USA").await;
    assert!(second["id"].as_i64().unwrap() > first["id"].as_i64().unwrap());
    assert_ne!(second["account_number"], first["account_number"]);
}

#[tokio::test]
async fn health_check() {
    let app = build_test_router();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
