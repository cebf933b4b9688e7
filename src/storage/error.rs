use std::fmt;
use std::io;

/// Failure categories for the payment record store
#[derive(Debug, Clone)]
pub enum StorageErrorKind {
    /// Order id cannot be used as a file name
    InvalidKey { key: String },
    /// Filesystem operation failed
    Io { message: String },
    /// Record could not be encoded or a stored file could not be decoded
    Serialization { message: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Clone)]
pub struct StorageError {
    pub kind: StorageErrorKind,
    pub context: Option<String>,
}

impl StorageError {
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::InvalidKey { key: key.into() })
    }

    pub fn from_io(error: io::Error) -> Self {
        Self::new(StorageErrorKind::Io {
            message: error.to_string(),
        })
    }

    pub fn from_serde(error: serde_json::Error) -> Self {
        Self::new(StorageErrorKind::Serialization {
            message: error.to_string(),
        })
    }

    pub fn is_invalid_key(&self) -> bool {
        matches!(self.kind, StorageErrorKind::InvalidKey { .. })
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match &self.kind {
            StorageErrorKind::InvalidKey { key } => {
                format!("'{}' is not a valid payment record key", key)
            }
            StorageErrorKind::Io { message } => format!("Record store I/O failed: {}", message),
            StorageErrorKind::Serialization { message } => {
                format!("Payment record (de)serialization failed: {}", message)
            }
        };

        if let Some(context) = &self.context {
            write!(f, "{} ({})", message, context)
        } else {
            write!(f, "{}", message)
        }
    }
}

impl std::error::Error for StorageError {}
