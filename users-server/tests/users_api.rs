//! /users routes end to end against a real PostgreSQL

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use users_server::http::{build_router, ServerConfig};

async fn app() -> Router {
    build_router(common::pool().await, &ServerConfig::default())
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn jo() -> Value {
    json!({
        "name": "Jo",
        "surname": "Ann",
        "age": 30,
        "hobbies": "chess",
        "relationship_status": "single"
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_get_delete_get_scenario() {
    let app = app().await;

    let (status, created) = call(&app, "POST", "/users/", Some(jo())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("numeric id");
    assert!(id >= 1);
    for field in ["name", "surname", "age", "hobbies", "relationship_status"] {
        assert_eq!(created[field], jo()[field], "field {field}");
    }

    let (status, fetched) = call(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = call(&app, "DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = call(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_user_routes_return_404() {
    let app = app().await;
    let uri = format!("/users/{}", common::MISSING_ID);

    let (status, _) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "PUT", &uri, Some(json!({ "age": 40 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn put_changes_only_supplied_fields() {
    let app = app().await;

    let (_, created) = call(&app, "POST", "/users", Some(jo())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = call(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(json!({ "relationship_status": "married", "hobbies": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["relationship_status"], "married");
    assert_eq!(updated["hobbies"], "chess");
    assert_eq!(updated["name"], "Jo");
    assert_eq!(updated["age"], 30);
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_returns_created_users() {
    let app = app().await;

    let (_, created) = call(&app, "POST", "/users/", Some(jo())).await;

    let (status, list) = call(&app, "GET", "/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().expect("array body");
    assert!(list.iter().any(|u| u["id"] == created["id"]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn out_of_range_age_never_stored() {
    let app = app().await;

    let mut body = jo();
    body["age"] = json!(150);
    let (status, _) = call(&app, "POST", "/users/", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = call(&app, "GET", "/users/", None).await;
    assert!(list
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u["age"].as_i64().unwrap() < 100));
}
