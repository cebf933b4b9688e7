use crate::payments::types::PaymentRecord;
use crate::storage::error::StorageError;
use async_trait::async_trait;

/// Storage for completed payment records, keyed by order id
///
/// There is no update or delete: a record is written once per capture.
/// Saving an id that already exists replaces the stored record.
#[async_trait]
pub trait PaymentRecordRepository: Send + Sync {
    /// Persist a record under its order id
    async fn save(&self, record: &PaymentRecord) -> Result<(), StorageError>;

    /// Every stored record, in no particular order
    async fn find_all(&self) -> Result<Vec<PaymentRecord>, StorageError>;
}
