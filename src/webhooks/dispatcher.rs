use crate::webhooks::WebhookError;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Sends JSON payloads to a single webhook URL
#[derive(Debug, Clone)]
pub struct WebhookDispatcher {
    client: Client,
    target_url: String,
}

impl WebhookDispatcher {
    pub fn new(client: Client, target_url: impl Into<String>) -> Self {
        Self {
            client,
            target_url: target_url.into(),
        }
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// POST the payload and wait for the transport only
    ///
    /// The downstream status code is returned for logging but never turned into
    /// an error: any answer at all counts as delivered.
    pub async fn send(&self, payload: &Value) -> Result<StatusCode, WebhookError> {
        let response = self
            .client
            .post(&self.target_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| WebhookError::Transport {
                url: self.target_url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(url = %self.target_url, status = %status, "Webhook delivered");
        } else {
            warn!(url = %self.target_url, status = %status, "Webhook answered with a non-success status");
        }
        Ok(status)
    }

    /// Fire-and-forget delivery on a detached task
    ///
    /// Failures are logged inside the task and never reach the caller. The
    /// handle is only useful to tests that want to wait for delivery.
    pub fn dispatch<T: Serialize>(&self, payload: &T) -> Result<JoinHandle<()>, WebhookError> {
        let payload = serde_json::to_value(payload).map_err(|e| WebhookError::Serialization {
            message: e.to_string(),
        })?;

        let dispatcher = self.clone();
        Ok(tokio::spawn(async move {
            if let Err(e) = dispatcher.send(&payload).await {
                error!(error = %e, "Webhook delivery failed");
            }
        }))
    }
}
