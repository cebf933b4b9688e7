//! PayPal payment provider implementation
//!
//! Talks to the PayPal REST API: an OAuth client-credentials exchange for a
//! bearer token, then the Orders v2 create and capture calls. A token is
//! fetched for every call sequence and never cached. Nothing is retried.

use crate::config::ProductConfig;
use crate::payments::errors::{ProviderError, ProviderResult};
use crate::payments::traits::PaymentProvider;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
pub const LIVE_BASE_URL: &str = "https://api-m.paypal.com";

/// Which PayPal environment the credentials belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaypalMode {
    Sandbox,
    Live,
}

impl PaypalMode {
    pub fn base_url(&self) -> &'static str {
        match self {
            PaypalMode::Sandbox => SANDBOX_BASE_URL,
            PaypalMode::Live => LIVE_BASE_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaypalMode::Sandbox => "sandbox",
            PaypalMode::Live => "live",
        }
    }
}

impl FromStr for PaypalMode {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(PaypalMode::Sandbox),
            "live" => Ok(PaypalMode::Live),
            other => Err(ProviderError::config_error(format!(
                "PAYPAL_MODE must be 'sandbox' or 'live', got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PaypalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PayPal provider configuration
#[derive(Clone)]
pub struct PaypalConfig {
    pub mode: PaypalMode,
    pub client_id: String,
    pub client_secret: String,
    /// API base URL, normally derived from `mode`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for PaypalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaypalConfig")
            .field("mode", &self.mode)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for PaypalConfig {
    fn default() -> Self {
        Self {
            mode: PaypalMode::Live,
            client_id: String::new(),
            client_secret: String::new(),
            base_url: LIVE_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl PaypalConfig {
    /// Create config from environment variables
    pub fn from_env() -> ProviderResult<Self> {
        // Anything unset falls back to the live API, same as a missing mode.
        let mode = match std::env::var("PAYPAL_MODE") {
            Ok(mode) if !mode.trim().is_empty() => mode.parse()?,
            _ => PaypalMode::Live,
        };

        let client_id = std::env::var("PAYPAL_CLIENT_ID").map_err(|_| {
            ProviderError::config_error("PAYPAL_CLIENT_ID environment variable is required")
        })?;

        let client_secret = std::env::var("PAYPAL_CLIENT_SECRET").map_err(|_| {
            ProviderError::config_error("PAYPAL_CLIENT_SECRET environment variable is required")
        })?;

        let base_url = std::env::var("PAYPAL_BASE_URL")
            .unwrap_or_else(|_| mode.base_url().to_string());

        let timeout_secs = parse_timeout_secs(std::env::var("PAYPAL_TIMEOUT_SECS").ok())?;

        Ok(Self {
            mode,
            client_id,
            client_secret,
            base_url,
            timeout_secs,
        })
    }
}

/// `PAYPAL_TIMEOUT_SECS`, defaulting to 30 when unset
fn parse_timeout_secs(value: Option<String>) -> ProviderResult<u64> {
    let Some(value) = value else {
        return Ok(30);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ProviderError::config_error(format!(
            "PAYPAL_TIMEOUT_SECS must be a positive number of seconds, got {}",
            value
        ))),
    }
}

/// PayPal payment provider
pub struct PaypalProvider {
    config: PaypalConfig,
    client: Client,
}

impl PaypalProvider {
    pub fn new(config: PaypalConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ProviderError::config_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Endpoint URL with each segment percent-encoded onto the base path
    fn endpoint_url(&self, segments: &[&str]) -> ProviderResult<Url> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            ProviderError::config_error(format!(
                "Invalid PayPal base URL {}: {}",
                self.config.base_url, e
            ))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::config_error(format!(
                    "PayPal base URL {} cannot take a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Exchange the client id and secret for a bearer token
    pub async fn access_token(&self) -> ProviderResult<String> {
        debug!("Requesting PayPal access token");

        let response = self
            .client
            .post(self.endpoint_url(&["v1", "oauth2", "token"])?)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.config.timeout_secs))?;

        let status = response.status();
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.config.timeout_secs))?;

        token.access_token.ok_or_else(|| {
            warn!(status = %status, "PayPal token response carried no access_token");
            ProviderError::authentication_error(format!(
                "token endpoint answered HTTP {} without an access token",
                status
            ))
        })
    }

    /// POST to an Orders endpoint with a fresh token and decode whatever comes back
    async fn post_with_token(&self, segments: &[&str], body: Option<&Value>) -> ProviderResult<Value> {
        let url = self.endpoint_url(segments)?;
        let token = self.access_token().await?;

        let mut request = self
            .client
            .post(url.clone())
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "PayPal answered with a non-success status");
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.config.timeout_secs))
    }
}

#[async_trait]
impl PaymentProvider for PaypalProvider {
    fn name(&self) -> &'static str {
        "paypal"
    }

    async fn create_order(&self, product: &ProductConfig) -> ProviderResult<Value> {
        let amount = product.amount_value();
        info!(
            amount = %amount,
            currency = %product.currency,
            "Creating PayPal order"
        );

        let payload = serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "amount": {
                    "currency_code": product.currency,
                    "value": amount,
                },
                "description": product.description,
            }],
        });

        let order = self
            .post_with_token(&["v2", "checkout", "orders"], Some(&payload))
            .await?;

        info!(
            order_id = order.get("id").and_then(serde_json::Value::as_str).unwrap_or("<none>"),
            "PayPal order created"
        );
        Ok(order)
    }

    async fn capture_order(&self, order_id: &str) -> ProviderResult<Value> {
        info!(order_id, "Capturing PayPal order");

        let capture = self
            .post_with_token(&["v2", "checkout", "orders", order_id, "capture"], None)
            .await?;

        info!(
            order_id,
            status = capture.get("status").and_then(serde_json::Value::as_str).unwrap_or("<none>"),
            "PayPal capture answered"
        );
        Ok(capture)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}
