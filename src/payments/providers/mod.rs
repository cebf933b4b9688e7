//! Payment provider implementations
//!
//! Concrete implementations of the PaymentProvider trait.

pub mod paypal;

pub use paypal::{PaypalConfig, PaypalMode, PaypalProvider};
