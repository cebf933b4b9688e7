use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Timeout error: provider did not answer within {seconds} seconds")]
    TimeoutError { seconds: u64 },

    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("Invalid provider response: {message}")]
    InvalidResponse { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid order id: {order_id:?}")]
    InvalidOrderId { order_id: String },
}

impl ProviderError {
    pub fn network_error(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    pub fn authentication_error(message: impl Into<String>) -> Self {
        Self::AuthenticationError {
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn invalid_order_id(order_id: impl Into<String>) -> Self {
        Self::InvalidOrderId {
            order_id: order_id.into(),
        }
    }

    /// Classify a transport failure from the HTTP client
    pub fn from_reqwest(error: reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Self::TimeoutError {
                seconds: timeout_secs,
            }
        } else if error.is_decode() {
            Self::invalid_response(error.to_string())
        } else {
            Self::network_error(error.to_string())
        }
    }
}
