//! Session handling against a local stand-in for the hosted gateway

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use super::{SupabaseClient, SESSION_EXPIRED};
use crate::config::GatewayConfig;
use crate::domain::{Identity, Session, VisionId};
use crate::error::GatewayError;
use crate::gateway::{IdentityService, TaskRepository};

const VALID_TOKENS: [&str; 2] = ["Bearer A1", "Bearer A2"];

#[derive(Default)]
struct Backend {
    refreshes: AtomicUsize,
}

type Reply = (StatusCode, Json<Value>);

fn session_body(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": refresh,
        "user": { "id": "u1", "email": "ada@example.com", "user_metadata": {} }
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| VALID_TOKENS.contains(&v))
}

async fn token(
    State(backend): State<Arc<Backend>>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Reply {
    match query.get("grant_type").map(String::as_str) {
        Some("password") if body["password"] == "secret" => (StatusCode::OK, Json(session_body("A1", "R1"))),
        Some("password") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" })),
        ),
        Some("refresh_token") => {
            backend.refreshes.fetch_add(1, Ordering::SeqCst);
            if body["refresh_token"] == "R1" {
                (StatusCode::OK, Json(session_body("A2", "R2")))
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error_description": "Invalid Refresh Token: Refresh Token Not Found" })),
                )
            }
        }
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "msg": "unsupported grant" }))),
    }
}

async fn user(headers: HeaderMap) -> Reply {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" })));
    }
    (StatusCode::OK, Json(json!({ "id": "u1", "email": "ada@example.com" })))
}

async fn logout() -> Reply {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "msg": "logout unavailable" })))
}

async fn tasks(headers: HeaderMap) -> Reply {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "JWT expired" })));
    }
    (
        StatusCode::OK,
        Json(json!([{ "id": 1, "vision_id": 3, "user_id": "u1", "title": "Run", "completed": false }])),
    )
}

async fn serve() -> (SupabaseClient, Arc<Backend>) {
    let backend = Arc::new(Backend::default());
    let app = Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/user", get(user))
        .route("/auth/v1/logout", post(logout))
        .route("/rest/v1/tasks", get(tasks))
        .with_state(backend.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = GatewayConfig::new(&format!("http://{}", addr), "anon").unwrap();
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    (SupabaseClient::with_http(config, http), backend)
}

fn stale_session(refresh_token: Option<&str>) -> Session {
    Session {
        access_token: "stale".to_string(),
        refresh_token: refresh_token.map(str::to_string),
        user: Identity::new("u1", "ada@example.com"),
    }
}

/// Record what the client reports: the new token, or `None` on expiry
fn record_changes(client: &SupabaseClient) -> Arc<Mutex<Vec<Option<String>>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    client.on_session_change(move |session| {
        sink.lock().push(session.map(|s| s.access_token.clone()));
    });
    seen
}

#[tokio::test]
async fn test_sign_in_switches_bearer_to_session_token() {
    let (client, _) = serve().await;
    assert_eq!(client.bearer(), "anon");

    let session = client.sign_in("ada@example.com", "secret").await.unwrap();

    assert_eq!(session.access_token, "A1");
    assert_eq!(client.bearer(), "A1");
    assert_eq!(client.current_user().await.unwrap().unwrap().id.as_str(), "u1");
}

#[tokio::test]
async fn test_bad_password_keeps_client_signed_out() {
    let (client, _) = serve().await;

    let err = client.sign_in("ada@example.com", "wrong").await.unwrap_err();

    assert_eq!(err, GatewayError::Auth("Invalid login credentials".to_string()));
    assert!(client.session().is_none());
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_retried() {
    let (client, backend) = serve().await;
    client.restore_session(stale_session(Some("R1")));
    let seen = record_changes(&client);

    let tasks = client.list_by_vision(&VisionId::new("3")).await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].vision_id.as_str(), "3");
    assert_eq!(client.session().unwrap().access_token, "A2");
    assert_eq!(backend.refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(*seen.lock(), vec![Some("A2".to_string())]);
}

#[tokio::test]
async fn test_parallel_rejections_refresh_once() {
    let (client, backend) = serve().await;
    client.restore_session(stale_session(Some("R1")));
    let vision = VisionId::new("3");

    let (first, second) = futures::join!(client.list_by_vision(&vision), client.list_by_vision(&vision));

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(backend.refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_refresh_ends_session() {
    let (client, _) = serve().await;
    client.restore_session(stale_session(Some("revoked")));
    let seen = record_changes(&client);

    let err = client.list_by_vision(&VisionId::new("3")).await.unwrap_err();

    assert_eq!(err, GatewayError::Auth(SESSION_EXPIRED.to_string()));
    assert!(client.session().is_none());
    assert_eq!(*seen.lock(), vec![None]);
}

#[tokio::test]
async fn test_rejected_session_reads_as_signed_out() {
    let (client, backend) = serve().await;
    client.restore_session(stale_session(None));

    assert!(client.current_user().await.unwrap().is_none());
    assert!(client.session().is_none());
    assert!(client.current_user().await.unwrap().is_none());
    assert_eq!(backend.refreshes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sign_out_clears_session_when_remote_fails() {
    let (client, _) = serve().await;
    client.sign_in("ada@example.com", "secret").await.unwrap();
    let seen = record_changes(&client);

    let result = client.sign_out().await;

    assert!(matches!(result, Err(GatewayError::Http { status: 500, .. })));
    assert!(client.session().is_none());
    assert_eq!(client.bearer(), "anon");
    // Signing out is not an expiry
    assert!(seen.lock().is_empty());
}
