use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::payments::types::{CaptureOrderRequest, CaptureOutcome};
use crate::AppState;

/// `POST /api/create-order`: the provider's order object, untouched
pub async fn create_order(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let order = state
        .payments
        .create_order()
        .await
        .map_err(|e| AppError::new("Failed to create order", e))?;

    Ok(Json(order))
}

/// `POST /api/capture-order`
pub async fn capture_order(
    State(state): State<AppState>,
    Json(request): Json<CaptureOrderRequest>,
) -> AppResult<Json<CaptureOutcome>> {
    let outcome = state
        .payments
        .capture_order(&request.order_id, request.user_info.unwrap_or_default())
        .await
        .map_err(|e| AppError::new("Failed to capture payment", e))?;

    Ok(Json(outcome))
}
