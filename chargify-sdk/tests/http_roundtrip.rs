//! End-to-end calls through `ReqwestTransport` against a local axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use chargify_sdk::{Args, Chargify, DomainTemplate, ErrorKind, ReqwestTransport};
use serde_json::{Value, json};
use tokio::io::AsyncReadExt;

const AUTH: &str = "Basic a2V5Ong=";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("chargify_core=debug,chargify_sdk=debug")
        .with_test_writer()
        .try_init();
}

async fn list_customers(headers: HeaderMap, RawQuery(query): RawQuery) -> impl IntoResponse {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(AUTH) {
        return (StatusCode::UNAUTHORIZED, axum::Json(json!({"errors": ["bad key"]})));
    }
    (
        StatusCode::OK,
        axum::Json(json!({
            "query": query,
            "accept": headers.get("accept").and_then(|v| v.to_str().ok()),
        })),
    )
}

async fn create_customer(headers: HeaderMap, body: String) -> impl IntoResponse {
    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    (
        StatusCode::CREATED,
        axum::Json(json!({
            "customer": payload,
            "content_type": headers.get("content-type").and_then(|v| v.to_str().ok()),
        })),
    )
}

async fn update_customer() -> impl IntoResponse {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({"errors": ["foo"]})),
    )
}

async fn delete_customer() -> StatusCode {
    StatusCode::OK
}

async fn broken() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>")
}

async fn spawn_server() -> SocketAddr {
    let router = Router::new()
        .route("/acme/customers.json", get(list_customers).post(create_customer))
        .route(
            "/acme/customers/7.json",
            get(list_customers).put(update_customer).delete(delete_customer),
        )
        .route("/acme/broken.json", get(broken));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, api_key: &str) -> Chargify {
    let domain = DomainTemplate::parse(format!("http://{addr}/{{subdomain}}/")).unwrap();
    Chargify::with_transport(api_key, "acme", Arc::new(ReqwestTransport::new())).with_domain(domain)
}

#[tokio::test]
async fn test_get_with_query_string() {
    init_tracing();
    let addr = spawn_server().await;

    let result = client(addr, "key")
        .path("customers")
        .call(Args::new().arg("q", "smith").arg("states", json!(["a", "b"])))
        .await
        .unwrap();

    assert_eq!(result["query"], "q=smith&states=a&states=b");
    assert_eq!(result["accept"], "application/json");
}

#[tokio::test]
async fn test_create_returns_created_body() {
    init_tracing();
    let addr = spawn_server().await;

    let result = client(addr, "key")
        .path("customers")
        .path("create")
        .call(Args::new().data(json!({"first_name": "Al"})))
        .await
        .unwrap();

    assert_eq!(result["customer"], json!({"first_name": "Al"}));
    assert_eq!(result["content_type"], "application/json");
}

#[tokio::test]
async fn test_identifier_routes_to_resource() {
    init_tracing();
    let addr = spawn_server().await;

    let result = client(addr, "key")
        .path("customers")
        .path("read")
        .call(Args::new().arg("customer_id", 7))
        .await
        .unwrap();

    assert_eq!(result["query"], Value::Null);
}

#[tokio::test]
async fn test_unauthorized() {
    init_tracing();
    let addr = spawn_server().await;

    let err = client(addr, "wrong")
        .path("customers")
        .call(Args::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));
    assert_eq!(err.body(), Some(&json!({"errors": ["bad key"]})));
}

#[tokio::test]
async fn test_unprocessable_update() {
    init_tracing();
    let addr = spawn_server().await;

    let err = client(addr, "key")
        .path("customers")
        .path("update")
        .call(
            Args::new()
                .arg("customer_id", 7)
                .data(json!({"email": "not-an-email"})),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::UnprocessableEntity));
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.body(), Some(&json!({"errors": ["foo"]})));
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    init_tracing();
    let addr = spawn_server().await;

    let result = client(addr, "key")
        .path("customers")
        .path("delete")
        .call(Args::new().arg("customer_id", 7))
        .await
        .unwrap();

    assert_eq!(result, json!({"body": ""}));
}

#[tokio::test]
async fn test_non_json_error_page() {
    init_tracing();
    let addr = spawn_server().await;

    let err = client(addr, "key")
        .path("broken")
        .call(Args::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Server));
    assert_eq!(err.body(), Some(&json!({"body": "<html>Bad Gateway</html>"})));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    init_tracing();
    let addr = spawn_server().await;

    let err = client(addr, "key")
        .path("products")
        .call(Args::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    assert_eq!(err.body(), Some(&json!({"body": ""})));
}

#[tokio::test]
async fn test_connection_refused() {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, "key")
        .path("customers")
        .call(Args::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Connection));
}

#[tokio::test]
async fn test_connection_dropped_before_response() {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        drop(socket);
    });

    let err = client(addr, "key")
        .path("customers")
        .call(Args::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Connection));
}
