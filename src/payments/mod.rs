//! Payment provider integration module
//!
//! Order creation and capture against PayPal, plus the service that turns a
//! completed capture into a stored record and a webhook event.

pub mod errors;
pub mod providers;
pub mod service;
pub mod traits;
pub mod types;

pub use service::PaymentService;
