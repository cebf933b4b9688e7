//! HTTP surface
//!
//! JSON endpoints under `/api`, a health probe, and the static site as the
//! fallback for everything else. Unknown paths get the landing page.

pub mod health;
pub mod notify;
pub mod orders;
pub mod payments;

use axum::{
    routing::{get, post},
    Router,
};
use http::HeaderName;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let landing_page = ServeFile::new(static_dir.join("index.html"));
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/create-order", post(orders::create_order))
        .route("/api/capture-order", post(orders::capture_order))
        .route("/api/payments", get(payments::list_payments))
        .route("/api/kr-payment-notify", post(notify::payment_notify))
        .fallback_service(ServeDir::new(static_dir).fallback(landing_page))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}
