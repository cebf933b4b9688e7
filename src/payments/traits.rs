//! Payment provider trait definitions
//!
//! Defines the interface the checkout flow needs from a payment provider.

use crate::config::ProductConfig;
use crate::payments::errors::ProviderResult;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for payment provider implementations
///
/// Responses are handed back as raw JSON: the checkout page consumes the
/// provider's own order object, so nothing is normalized here.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Create a single-item order for the configured product
    ///
    /// # Returns
    /// * `Value` - The provider's order object, verbatim
    async fn create_order(&self, product: &ProductConfig) -> ProviderResult<Value>;

    /// Capture an order the buyer has approved
    ///
    /// # Arguments
    /// * `order_id` - Opaque provider order id returned by `create_order`
    ///
    /// # Returns
    /// * `Value` - The provider's capture response, verbatim
    async fn capture_order(&self, order_id: &str) -> ProviderResult<Value>;
}
