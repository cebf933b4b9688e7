use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::payments::types::PaymentRecord;
use crate::AppState;

/// `GET /api/payments`: every stored record, unpaginated
pub async fn list_payments(State(state): State<AppState>) -> AppResult<Json<Vec<PaymentRecord>>> {
    let records = state
        .payments
        .list_payments()
        .await
        .map_err(|e| AppError::new("Failed to list payments", e))?;

    Ok(Json(records))
}
