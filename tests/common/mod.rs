#![allow(dead_code)]

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Method, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use momentum_backend::config::{
    Config, ProductConfig, ServerConfig, StorageConfig, WebhookConfig,
};
use momentum_backend::payments::providers::{PaypalConfig, PaypalMode};
use momentum_backend::{api, AppState};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::{Path as FsPath, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Capture ids starting with this prefix come back as not completed
pub const PENDING_PREFIX: &str = "PENDING-";

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing is listening on
pub async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Minimal stand-in for the PayPal token and Orders v2 endpoints
pub async fn spawn_paypal_stub() -> String {
    async fn token() -> Json<Value> {
        Json(json!({ "access_token": "stub-token", "token_type": "Bearer", "expires_in": 32400 }))
    }

    async fn create(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        (
            StatusCode::CREATED,
            Json(json!({
                "id": "5O190127TN364715T",
                "status": "CREATED",
                "purchase_units": body["purchase_units"],
                "links": [{ "rel": "approve", "href": "https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T" }]
            })),
        )
    }

    async fn capture(Path(order_id): Path<String>) -> (StatusCode, Json<Value>) {
        if order_id.starts_with(PENDING_PREFIX) {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "id": order_id,
                    "status": "PAYER_ACTION_REQUIRED",
                    "name": "UNPROCESSABLE_ENTITY"
                })),
            );
        }
        (
            StatusCode::CREATED,
            Json(json!({
                "id": order_id,
                "status": "COMPLETED",
                "payer": { "email_address": "buyer@example.com" },
                "purchase_units": [{
                    "payments": { "captures": [{ "id": format!("TXN-{}", order_id), "status": "COMPLETED" }] }
                }]
            })),
        )
    }

    let app = Router::new()
        .route("/v1/oauth2/token", post(token))
        .route("/v2/checkout/orders", post(create))
        .route("/v2/checkout/orders/:order_id/capture", post(capture));
    format!("http://{}", serve(app).await)
}

/// Webhook receiver that records every payload and answers with `status`
pub struct WebhookStub {
    pub url: String,
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl WebhookStub {
    pub fn payloads(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    /// Detached deliveries land eventually; poll for them briefly
    pub async fn wait_for(&self, count: usize) -> Vec<Value> {
        for _ in 0..100 {
            let payloads = self.payloads();
            if payloads.len() >= count {
                return payloads;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.payloads()
    }
}

pub async fn spawn_webhook_stub(status: StatusCode) -> WebhookStub {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let app = Router::new().route(
        "/hook",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(body);
                status
            }
        }),
    );
    let addr = serve(app).await;
    WebhookStub {
        url: format!("http://{}/hook", addr),
        received,
    }
}

pub struct TestEnv {
    pub root: tempfile::TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let static_dir = root.path().join("public");
        std::fs::create_dir_all(static_dir.join("css")).unwrap();
        std::fs::write(
            static_dir.join("index.html"),
            "<!doctype html><title>Momentum Biz</title>",
        )
        .unwrap();
        std::fs::write(static_dir.join("css").join("site.css"), "body { margin: 0 }").unwrap();
        Self { root }
    }

    pub fn payments_dir(&self) -> PathBuf {
        self.root.path().join("payments")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.path().join("public")
    }

    pub fn config(&self, paypal_base: &str, webhook_url: Option<String>, notify_fallback: &str) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                environment: "development".to_string(),
                static_dir: self.static_dir(),
            },
            paypal: PaypalConfig {
                mode: PaypalMode::Sandbox,
                client_id: "test-client".to_string(),
                client_secret: "test-secret".to_string(),
                base_url: paypal_base.to_string(),
                timeout_secs: 5,
            },
            webhook: WebhookConfig {
                url: webhook_url,
                notify_fallback_url: notify_fallback.to_string(),
            },
            storage: StorageConfig {
                payments_dir: self.payments_dir(),
            },
            product: ProductConfig::default(),
        }
    }

    pub fn router(&self, config: Config) -> Router {
        api::router(AppState::from_config(config).unwrap())
    }

    pub fn stored_file(&self, order_id: &str) -> Option<Value> {
        let path = self.payments_dir().join(format!("{}.json", order_id));
        std::fs::read(path)
            .ok()
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
    }

    pub fn stored_count(&self) -> usize {
        count_json_files(&self.payments_dir())
    }
}

fn count_json_files(dir: &FsPath) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("json"))
            .count(),
        Err(_) => 0,
    }
}

pub async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

pub async fn call_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = call(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
