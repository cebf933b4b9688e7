//! File-backed payment record store

pub mod error;
pub mod payment_repository;
pub mod repository;

pub use error::{StorageError, StorageResult};
pub use payment_repository::FilePaymentRepository;
pub use repository::PaymentRecordRepository;
