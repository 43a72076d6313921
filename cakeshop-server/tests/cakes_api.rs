//! Router tests over the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cakeshop_server::{build_router, AppState, Cake, MemoryCakeStore, ServerConfig};

fn app() -> (Router, Arc<MemoryCakeStore>) {
    let store = Arc::new(MemoryCakeStore::new());
    let state = AppState::new(store.clone());
    (build_router(state, &ServerConfig::default()), store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_owned())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn read_body(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn read_json(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).unwrap()
}

/// POST a cake and return the id from the Location header.
async fn create(app: &Router, payload: Value) -> i64 {
    let response = send(app, "POST", "/cakes", Some(&payload.to_string())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()[header::LOCATION].to_str().unwrap();
    location
        .strip_prefix("/cakes/")
        .and_then(|id| id.parse().ok())
        .expect("location header carries the new id")
}

#[tokio::test]
async fn list_empty_table_is_empty_array() {
    let (app, _) = app();

    let response = send(&app, "GET", "/cakes", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn list_orders_by_rating_desc_then_title_asc() {
    let (app, _) = app();
    create(&app, json!({ "title": "Carrot", "rating": 7.0 })).await;
    create(&app, json!({ "title": "Black Forest", "rating": 9.5 })).await;
    create(&app, json!({ "title": "Angel", "rating": 7.0 })).await;
    create(&app, json!({ "title": "Zebra", "rating": 2.0 })).await;

    let response = send(&app, "GET", "/cakes", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cakes: Vec<Cake> = serde_json::from_slice(&read_body(response).await).unwrap();
    let titles: Vec<_> = cakes.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Black Forest", "Angel", "Carrot", "Zebra"]);
}

#[tokio::test]
async fn create_then_get_round_trips_fields() {
    let (app, _) = app();
    let id = create(
        &app,
        json!({
            "title": "T",
            "description": "D",
            "rating": 9.5,
            "image": "http://x/img.jpg"
        }),
    )
    .await;

    let response = send(&app, "GET", &format!("/cakes/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "T");
    assert_eq!(body["description"], "D");
    assert_eq!(body["rating"], 9.5);
    assert_eq!(body["image"], "http://x/img.jpg");
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
    assert!(body["deleted_at"].is_null());
}

#[tokio::test]
async fn create_response_has_empty_body() {
    let (app, _) = app();
    let response = send(&app, "POST", "/cakes", Some(r#"{"title": "Sponge"}"#)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(read_body(response).await.is_empty());
}

#[tokio::test]
async fn create_assigns_fresh_ids_and_ignores_client_id() {
    let (app, _) = app();
    let first = create(&app, json!({ "id": 500, "title": "A" })).await;
    let second = create(&app, json!({ "id": 500, "title": "B" })).await;

    assert_ne!(first, 500);
    assert_ne!(first, second);
}

#[tokio::test]
async fn create_accepts_values_without_validation() {
    let (app, _) = app();
    let id = create(
        &app,
        json!({ "title": "", "rating": 42.0, "image": "not a url" }),
    )
    .await;

    let body = read_json(send(&app, "GET", &format!("/cakes/{}", id), None).await).await;
    assert_eq!(body["title"], "");
    assert_eq!(body["rating"], 42.0);
    assert_eq!(body["image"], "not a url");
}

#[tokio::test]
async fn create_without_content_type_still_decodes() {
    let (app, store) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/cakes")
        .body(Body::from(r#"{"title": "Plain"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn malformed_json_on_create_is_400_and_writes_nothing() {
    let (app, store) = app();

    let response = send(&app, "POST", "/cakes", Some(r#"{"title": "Broken""#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"].is_string());

    let response = send(&app, "POST", "/cakes", Some(r#"{"rating": "high"}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn null_title_and_rating_store_zero_values() {
    let (app, _) = app();
    let id = create(&app, json!({ "title": null, "rating": null })).await;

    let body = read_json(send(&app, "GET", &format!("/cakes/{}", id), None).await).await;
    assert_eq!(body["title"], "");
    assert_eq!(body["rating"], 0.0);
    assert!(body["description"].is_null());
}

#[tokio::test]
async fn oversized_body_keeps_payload_too_large_status() {
    let (app, store) = app();
    let title = "x".repeat(3 * 1024 * 1024);
    let payload = json!({ "title": title }).to_string();

    let response = send(&app, "POST", "/cakes", Some(&payload)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(read_json(response).await["error"].is_string());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn get_missing_id_is_404() {
    let (app, _) = app();

    let response = send(&app, "GET", "/cakes/12345", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await, json!({ "error": "Cake not found" }));
}

#[tokio::test]
async fn non_integer_id_is_400_without_store_access() {
    let (app, store) = app();
    // A closed store would answer 500 if it were reached.
    store.close();

    for uri in ["/cakes/abc", "/cakes/1.5", "/cakes/99999999999999999999"] {
        let response = send(&app, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(read_json(response).await, json!({ "error": "Invalid cake ID" }));
    }

    let response = send(&app, "PUT", "/cakes/abc", Some(r#"{"title": "X"}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "DELETE", "/cakes/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_changes_mutable_fields_only() {
    let (app, _) = app();
    let id = create(
        &app,
        json!({ "title": "Old", "description": "old", "rating": 3.0, "image": "http://x/old.jpg" }),
    )
    .await;
    let before = read_json(send(&app, "GET", &format!("/cakes/{}", id), None).await).await;

    let response = send(
        &app,
        "PUT",
        &format!("/cakes/{}", id),
        Some(r#"{"id": 999, "title": "New", "description": "new", "rating": 8.0, "image": "http://x/new.jpg"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_body(response).await.is_empty());

    let after = read_json(send(&app, "GET", &format!("/cakes/{}", id), None).await).await;
    assert_eq!(after["id"], id);
    assert_eq!(after["title"], "New");
    assert_eq!(after["description"], "new");
    assert_eq!(after["rating"], 8.0);
    assert_eq!(after["image"], "http://x/new.jpg");
    assert_eq!(after["created_at"], before["created_at"]);
}

#[tokio::test]
async fn update_missing_id_still_succeeds() {
    let (app, store) = app();

    let response = send(&app, "PUT", "/cakes/77", Some(r#"{"title": "Ghost"}"#)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn malformed_json_on_update_is_400_and_leaves_row() {
    let (app, _) = app();
    let id = create(&app, json!({ "title": "Keep", "rating": 5.0 })).await;

    let response = send(&app, "PUT", &format!("/cakes/{}", id), Some("not json")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(send(&app, "GET", &format!("/cakes/{}", id), None).await).await;
    assert_eq!(body["title"], "Keep");
    assert_eq!(body["rating"], 5.0);
}

#[tokio::test]
async fn delete_removes_row() {
    let (app, _) = app();
    let id = create(&app, json!({ "title": "Gone" })).await;

    let response = send(&app, "DELETE", &format!("/cakes/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_body(response).await.is_empty());

    let response = send(&app, "GET", &format!("/cakes/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_id_still_succeeds() {
    let (app, _) = app();
    let response = send(&app, "DELETE", "/cakes/404", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn storage_failure_is_500_with_driver_message() {
    let (app, store) = app();
    store.close();
    let expected = sqlx::Error::PoolClosed.to_string();

    let response = send(&app, "GET", "/cakes", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await, json!({ "error": expected }));

    let response = send(&app, "GET", "/cakes/1", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = send(&app, "POST", "/cakes", Some(r#"{"title": "X"}"#)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = send(&app, "PUT", "/cakes/1", Some(r#"{"title": "X"}"#)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = send(&app, "DELETE", "/cakes/1", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_endpoint() {
    let (app, _) = app();
    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], "ok");
}
