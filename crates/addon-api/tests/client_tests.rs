//! Client tests against a mock addon API

use addon_api::{AddonApiClient, AddonId, ApiError, Environment};
use axum::extract::{Path, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

const INSTANCE: &str = "123e4567-e89b-12d3-a456-426614174000";
const ADDON: &str = "9b2c1f4e-7d3a-4c58-8e21-5f6a7b8c9d0e";

#[derive(Debug, Deserialize)]
struct Echo {
    addon: String,
    authorization: Option<String>,
    query: HashMap<String, String>,
}

async fn echo(
    Path(addon): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "Resp": { "addon": addon, "authorization": authorization, "query": query } }))
}

async fn collection_rows(
    Path((addon, collection)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    Json(json!({ "Resp": { "addon": addon, "collection": collection, "query": query } }))
}

async fn create(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "Resp": { "received": body } }))
}

async fn remote_error() -> Json<Value> {
    Json(json!({ "Error": { "description": "collection not found" } }))
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/addon-api/v1/{addon}/echo", get(echo))
        .route("/addon-api/v1/{addon}/items", post(create))
        .route(
            "/addon-api/v1/{addon}/schema/{collection}/query",
            get(collection_rows),
        )
        .route("/addon-api/v1/{addon}/broken", get(remote_error))
        .route(
            "/addon-api/v1/{addon}/forbidden",
            get(|| async { (StatusCode::FORBIDDEN, "instance not allowed") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn client() -> AddonApiClient {
    let addr = spawn_server().await;
    let env = Environment::new(format!("http://{addr}/addon-api/v1/{{addon-id}}/"), INSTANCE).unwrap();
    AddonApiClient::new(Arc::new(env), ADDON.parse::<AddonId>().unwrap()).unwrap()
}

#[tokio::test]
async fn test_get_resolves_template_and_sends_token() {
    let client = client().await;
    let echo: Echo = client
        .get_with_query("/echo", &[("limit", "10")])
        .await
        .unwrap();

    assert_eq!(echo.addon, ADDON);
    assert_eq!(echo.authorization.as_deref(), Some(format!("Basic {INSTANCE}").as_str()));
    assert_eq!(echo.query.get("limit").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn test_post_json_body() {
    let client = client().await;
    let resp: Value = client
        .post("items", &json!({ "title": "hello" }))
        .await
        .unwrap();
    assert_eq!(resp, json!({ "received": { "title": "hello" } }));
}

#[tokio::test]
async fn test_remote_error_envelope() {
    let client = client().await;
    let err = client.get::<Value>("broken").await.unwrap_err();
    match err {
        ApiError::Remote { description } => assert_eq!(description, "collection not found"),
        other => panic!("Expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_success_status() {
    let client = client().await;
    let err = client.get::<Value>("forbidden").await.unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "instance not allowed");
        }
        other => panic!("Expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_endpoint_and_debug() {
    let client = client().await;
    let url = client.endpoint("echo").unwrap();
    assert!(url.path().ends_with(&format!("/addon-api/v1/{ADDON}/echo")));
    assert_eq!(client.environment().instance_uuid(), INSTANCE);
    let debug = format!("{client:?}");
    assert!(!debug.contains("Basic"));
    assert!(!debug.contains(INSTANCE));
}

#[derive(Debug, Serialize)]
struct RowQuery {
    limit: u32,
    offset: u32,
    sort: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RowsEcho {
    addon: String,
    collection: String,
    query: HashMap<String, String>,
}

#[tokio::test]
async fn test_query_rows_sends_structured_query() {
    let client = client().await;
    let query = RowQuery {
        limit: 25,
        offset: 50,
        sort: Some("title".to_string()),
    };
    let rows: RowsEcho = client.query_rows("posts", &query).await.unwrap();

    assert_eq!(rows.addon, ADDON);
    assert_eq!(rows.collection, "posts");
    assert_eq!(rows.query.get("limit").map(String::as_str), Some("25"));
    assert_eq!(rows.query.get("offset").map(String::as_str), Some("50"));
    assert_eq!(rows.query.get("sort").map(String::as_str), Some("title"));
}

#[tokio::test]
async fn test_query_rows_rejects_bad_collection() {
    let client = client().await;
    for bad in ["", "posts/../../admin", "posts?x=1", ".."] {
        let err = client
            .query_rows::<_, Value>(bad, &[("limit", "1")])
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApiError::InvalidCollection { .. }),
            "{bad} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn test_refuses_to_leave_the_api_base() {
    let client = client().await;
    for escaping in ["https://evil.example/steal", "../../../admin"] {
        let err = client.get::<Value>(escaping).await.unwrap_err();
        assert!(matches!(err, ApiError::Env(_)), "{escaping} gave {err:?}");
    }
}
