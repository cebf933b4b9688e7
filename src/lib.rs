//! Momentum business blog backend
//!
//! PayPal checkout for the consulting report, a notify relay for domestic
//! payments, a file-backed payment history and the static site.

pub mod api;
pub mod config;
pub mod error;
pub mod payments;
pub mod storage;
pub mod webhooks;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::config::Config;
use crate::payments::providers::PaypalProvider;
use crate::payments::PaymentService;
use crate::storage::FilePaymentRepository;
use crate::webhooks::WebhookDispatcher;

/// Shared handler state; everything in it is read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub payments: PaymentService,
    /// Relay for `/api/kr-payment-notify`
    pub notify: WebhookDispatcher,
}

impl AppState {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.paypal.timeout_secs))
            .build()
            .context("Failed to create webhook HTTP client")?;

        let provider = PaypalProvider::new(config.paypal.clone())
            .context("Failed to initialize PayPal provider")?;
        let repository = FilePaymentRepository::new(config.storage.payments_dir.clone());

        let payment_webhook = config
            .webhook
            .url
            .as_ref()
            .map(|url| WebhookDispatcher::new(client.clone(), url.clone()));
        let notify = WebhookDispatcher::new(client, config.webhook.notify_url());

        let payments = PaymentService::new(
            Arc::new(provider),
            Arc::new(repository),
            payment_webhook,
            config.product.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            payments,
            notify,
        })
    }
}
