//! Payment types and data structures
//!
//! Request payloads accepted by the capture endpoint and the payment record
//! that is written once an order is captured.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ProductConfig;

/// Event name carried by every stored payment record
pub const PAYMENT_COMPLETED_EVENT: &str = "payment_completed";

/// Capture status reported by the provider for a finalized order
pub const CAPTURE_STATUS_COMPLETED: &str = "COMPLETED";

/// Order ids double as record file names, so only `[A-Za-z0-9_-]` is accepted
pub fn is_valid_order_id(order_id: &str) -> bool {
    !order_id.is_empty()
        && order_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Buyer details sent by the checkout page alongside the order id
///
/// Nothing here is validated; fields the page leaves out stay `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub ceo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Identifier of the user in the external sign-in system
    #[serde(default, alias = "external_uid")]
    pub uid: Option<String>,
}

/// Body of `POST /api/capture-order`
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureOrderRequest {
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(rename = "userInfo", default)]
    pub user_info: Option<UserInfo>,
}

/// Buyer section of a stored payment record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_uid: Option<String>,
}

impl From<UserInfo> for RecordUser {
    fn from(info: UserInfo) -> Self {
        Self {
            name: info.name,
            company: info.company,
            ceo: info.ceo,
            email: info.email,
            phone: info.phone,
            external_uid: info.uid,
        }
    }
}

/// Provider-side identifiers of a completed capture
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl ProviderDetails {
    /// Pull the payer email and the first capture id out of a raw capture response
    pub fn from_capture(capture: &Value) -> Self {
        let field = |pointer: &str| {
            capture
                .pointer(pointer)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };

        Self {
            payer_email: field("/payer/email_address"),
            transaction_id: field("/purchase_units/0/payments/captures/0/id"),
        }
    }
}

/// A completed payment, persisted once per order id and never modified
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRecord {
    pub event: String,
    /// ISO-8601 UTC timestamp with millisecond precision
    pub timestamp: String,
    pub order_id: String,
    /// Decimal string, e.g. `"5.00"`
    pub amount: String,
    pub currency: String,
    pub description: String,
    pub user: RecordUser,
    pub provider: ProviderDetails,
}

impl PaymentRecord {
    pub fn completed(
        order_id: impl Into<String>,
        product: &ProductConfig,
        user: RecordUser,
        provider: ProviderDetails,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event: PAYMENT_COMPLETED_EVENT.to_string(),
            timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            order_id: order_id.into(),
            amount: product.amount_value(),
            currency: product.currency.clone(),
            description: product.description.clone(),
            user,
            provider,
        }
    }
}

/// Result of a capture attempt, serialized as the endpoint's response body
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CaptureOutcome {
    /// The provider finalized the order and a record was produced
    Completed {
        status: String,
        #[serde(rename = "paymentData")]
        payment_data: PaymentRecord,
    },
    /// Any other provider status; the raw response is passed back untouched
    NotCompleted {
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<String>,
        details: Value,
    },
}

impl CaptureOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CaptureOutcome::Completed { .. })
    }
}
