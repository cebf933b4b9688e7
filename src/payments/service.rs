//! Checkout flow
//!
//! Glue between the provider, the record store and the payment webhook. A
//! record is produced only when the provider reports the capture as
//! `COMPLETED`; everything after that point is best effort.

use crate::config::ProductConfig;
use crate::payments::errors::{ProviderError, ProviderResult};
use crate::payments::traits::PaymentProvider;
use crate::payments::types::{
    is_valid_order_id, CaptureOutcome, PaymentRecord, ProviderDetails, UserInfo,
    CAPTURE_STATUS_COMPLETED,
};
use crate::storage::{PaymentRecordRepository, StorageResult};
use crate::webhooks::WebhookDispatcher;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct PaymentService {
    provider: Arc<dyn PaymentProvider>,
    repository: Arc<dyn PaymentRecordRepository>,
    webhook: Option<WebhookDispatcher>,
    product: ProductConfig,
}

impl PaymentService {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        repository: Arc<dyn PaymentRecordRepository>,
        webhook: Option<WebhookDispatcher>,
        product: ProductConfig,
    ) -> Self {
        Self {
            provider,
            repository,
            webhook,
            product,
        }
    }

    pub async fn create_order(&self) -> ProviderResult<Value> {
        self.provider.create_order(&self.product).await
    }

    pub async fn capture_order(
        &self,
        order_id: &str,
        user_info: UserInfo,
    ) -> ProviderResult<CaptureOutcome> {
        // The id becomes the record's file name, so refuse it before money moves.
        if !is_valid_order_id(order_id) {
            warn!(order_id, "Capture refused for malformed order id");
            return Err(ProviderError::invalid_order_id(order_id));
        }

        let capture = self.provider.capture_order(order_id).await?;

        let status = capture
            .get("status")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        if status.as_deref() != Some(CAPTURE_STATUS_COMPLETED) {
            info!(
                order_id,
                provider = self.provider.name(),
                status = status.as_deref().unwrap_or("<none>"),
                "Capture not completed, nothing recorded"
            );
            return Ok(CaptureOutcome::NotCompleted {
                status,
                details: capture,
            });
        }

        let record = PaymentRecord::completed(
            order_id,
            &self.product,
            user_info.into(),
            ProviderDetails::from_capture(&capture),
            Utc::now(),
        );

        info!(
            order_id,
            provider = self.provider.name(),
            record = %serde_json::to_string(&record).unwrap_or_default(),
            "Payment completed"
        );

        if let Some(webhook) = &self.webhook {
            if let Err(e) = webhook.dispatch(&record) {
                error!(order_id, error = %e, "Payment webhook not sent");
            }
        }

        if let Err(e) = self.repository.save(&record).await {
            error!(order_id, error = %e, "Failed to persist payment record");
        }

        Ok(CaptureOutcome::Completed {
            status: CAPTURE_STATUS_COMPLETED.to_string(),
            payment_data: record,
        })
    }

    pub async fn list_payments(&self) -> StorageResult<Vec<PaymentRecord>> {
        self.repository.find_all().await
    }
}
