//! Outbound webhook delivery
//!
//! Payment events and relayed notifications are POSTed as JSON to an external
//! automation endpoint. Delivery is best effort: nothing is queued or retried.

pub mod dispatcher;

pub use dispatcher::WebhookDispatcher;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Webhook request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Webhook payload could not be encoded: {message}")]
    Serialization { message: String },
}
