use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// `POST /api/kr-payment-notify`
///
/// Relays a domestic (bank transfer) payment request to the webhook verbatim.
/// Success only means the request went out; the webhook's answer is ignored.
pub async fn payment_notify(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let payload =
        relay_payload(&headers, &body).map_err(|e| AppError::new("Invalid JSON body", e))?;

    let status = state
        .notify
        .send(&payload)
        .await
        .map_err(|e| AppError::new("Failed to send webhook", e))?;

    info!(
        url = %state.notify.target_url(),
        webhook_status = %status,
        payload = %payload,
        "Payment notification relayed"
    );

    Ok(Json(json!({ "success": true })))
}

/// Body to forward: parsed JSON when the request says it is JSON, `{}` otherwise
fn relay_payload(headers: &HeaderMap, body: &[u8]) -> Result<Value, serde_json::Error> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false);

    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        debug!(is_json, len = body.len(), "No JSON body, relaying an empty object");
        return Ok(json!({}));
    }

    serde_json::from_slice(body)
}
