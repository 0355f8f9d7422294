//! In-process fake backend and gateway bootstrap for integration tests.

#![allow(clippy::panic, dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use custody_console::api;
use custody_console::app_state::AppState;
use custody_console::cache::{CachePolicies, QueryCache};
use custody_console::client::BackendClient;
use custody_console::domain::EventBus;
use custody_console::service::ConsoleService;

/// Request counters recorded by the fake backend.
#[derive(Debug, Default)]
pub struct Hits {
    /// `GET /users` calls.
    pub user_lists: AtomicUsize,
    /// `PATCH /users/{id}/status` calls.
    pub status_updates: AtomicUsize,
    /// `POST /blockchain/withdrawals/{id}/retry` calls.
    pub retries: AtomicUsize,
}

impl Hits {
    /// Reads a counter.
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// A running gateway wired to a running fake backend.
#[derive(Debug)]
pub struct Harness {
    /// Gateway address.
    pub gateway: SocketAddr,
    /// Backend request counters.
    pub hits: Arc<Hits>,
    /// HTTP client for driving the gateway.
    pub http: reqwest::Client,
}

impl Harness {
    /// Full gateway URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.gateway)
    }

    /// `GET` returning status and JSON body.
    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let Ok(response) = self.http.get(self.url(path)).send().await else {
            panic!("GET {path} failed");
        };
        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }
}

async fn list_users(State(hits): State<Arc<Hits>>) -> Json<Value> {
    hits.user_lists.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "data": [
            {"id": "u-1", "email": "alice@acme.io", "organization": "Acme", "role": "admin", "status": "active", "mfa_enabled": true},
            {"id": "u-2", "email": "bob@globex.com", "organization": "Globex", "role": "operator", "status": "suspended"},
            {"id": "u-3", "email": "carol@acme.io", "role": "customer", "status": "active"}
        ],
        "total": 3
    }))
}

async fn update_user_status(
    State(hits): State<Arc<Hits>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    hits.status_updates.fetch_add(1, Ordering::SeqCst);
    Json(json!({"id": id, "status": body.get("status").cloned().unwrap_or(Value::Null)}))
}

async fn list_withdrawals() -> Json<Value> {
    Json(json!([
        {"id": "w-1", "chain": "ethereum", "currency": "ETH", "to_address": "0xabc", "amount": "1.5",
         "confirmations": 0, "required_confirmations": 12, "status": "failed", "error_message": "nonce too low"},
        {"id": "w-2", "chain": "bitcoin", "currency": "BTC", "to_address": "bc1q", "amount": "0.1",
         "confirmations": 3, "required_confirmations": 6, "status": "broadcasted"}
    ]))
}

async fn retry_withdrawal(State(hits): State<Arc<Hits>>, Path(id): Path<String>) -> Json<Value> {
    hits.retries.fetch_add(1, Ordering::SeqCst);
    Json(json!({"id": id, "status": "pending"}))
}

async fn list_networks() -> Json<Value> {
    Json(json!([
        {"chain": "ethereum", "status": "healthy", "block_height": 19_000_000},
        {"chain": "bitcoin", "status": "down", "block_height": 830_000}
    ]))
}

async fn list_audit_logs() -> Json<Value> {
    Json(json!({
        "a-1": {"id": "a-1", "user_id": "u-1", "action": "login", "resource_type": "session",
                "resource_id": "s-1", "result": "success", "ip_address": "10.0.0.1",
                "created_at": "2024-01-15T10:30:00Z"},
        "a-2": {"id": "a-2", "user_id": "u-2", "action": "note, \"flagged\"", "resource_type": "case",
                "resource_id": "c-9", "result": "failure", "ip_address": "10.0.0.2",
                "created_at": "2024-01-15T11:00:00Z"}
    }))
}

async fn missing_wallet() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"message": "wallet not found"})))
}

async fn empty_list() -> Json<Value> {
    Json(json!([]))
}

fn backend_router(hits: Arc<Hits>) -> Router {
    Router::new()
        .route("/api/v1/users", get(list_users))
        .route("/api/v1/users/{id}/status", patch(update_user_status))
        .route("/api/v1/wallets/{id}", get(missing_wallet))
        .route("/api/v1/blockchain/withdrawals", get(list_withdrawals))
        .route("/api/v1/blockchain/withdrawals/{id}/retry", post(retry_withdrawal))
        .route("/api/v1/blockchain/networks", get(list_networks))
        .route("/api/v1/audit-logs", get(list_audit_logs))
        .fallback(empty_list)
        .with_state(hits)
}

async fn serve(app: Router) -> SocketAddr {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("cannot bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Starts the fake backend and a gateway pointed at it.
pub async fn start() -> Harness {
    let hits = Arc::new(Hits::default());
    let backend = serve(backend_router(Arc::clone(&hits))).await;

    let backend_url = format!("http://{backend}/api/v1");
    let Ok(client) = BackendClient::new(&backend_url, None) else {
        panic!("invalid backend url {backend_url}");
    };
    let event_bus = EventBus::new(64);
    let cache = Arc::new(QueryCache::new(event_bus.clone()));
    let service = Arc::new(ConsoleService::new(
        &client,
        cache,
        CachePolicies::default(),
        event_bus,
    ));
    let gateway = serve(api::build_app(AppState::new(service, &backend_url))).await;

    Harness {
        gateway,
        hits,
        http: reqwest::Client::new(),
    }
}
