use crate::payments::types::{is_valid_order_id, PaymentRecord};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::repository::PaymentRecordRepository;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const RECORD_EXTENSION: &str = "json";

/// Payment records stored as one pretty-printed JSON file per order id
///
/// The directory is created on the first write. There is no locking: two
/// concurrent saves of the same order both write the file and the last one
/// wins.
#[derive(Debug, Clone)]
pub struct FilePaymentRepository {
    dir: PathBuf,
}

impl FilePaymentRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding the record for `order_id`
    pub fn record_path(&self, order_id: &str) -> StorageResult<PathBuf> {
        if !is_valid_order_id(order_id) {
            return Err(StorageError::invalid_key(order_id));
        }
        Ok(self.dir.join(format!("{}.{}", order_id, RECORD_EXTENSION)))
    }

    async fn read_record(path: &Path) -> StorageResult<PaymentRecord> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| StorageError::from_io(e).with_context(path.display().to_string()))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::from_serde(e).with_context(path.display().to_string()))
    }
}

#[async_trait]
impl PaymentRecordRepository for FilePaymentRepository {
    async fn save(&self, record: &PaymentRecord) -> StorageResult<()> {
        let path = self.record_path(&record.order_id)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::from_io(e).with_context(self.dir.display().to_string()))?;

        let body = serde_json::to_vec_pretty(record).map_err(StorageError::from_serde)?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| StorageError::from_io(e).with_context(path.display().to_string()))?;

        info!(
            order_id = %record.order_id,
            path = %path.display(),
            "Payment record written"
        );
        Ok(())
    }

    async fn find_all(&self) -> StorageResult<Vec<PaymentRecord>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %self.dir.display(), "Record store does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StorageError::from_io(e).with_context(self.dir.display().to_string()))
            }
        };

        let mut records = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::from_io(e).with_context(self.dir.display().to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            records.push(Self::read_record(&path).await?);
        }

        debug!(count = records.len(), "Loaded payment records");
        Ok(records)
    }
}
