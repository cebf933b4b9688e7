//! Application error type
//!
//! Every failure that reaches an HTTP handler is wrapped in an [`AppError`].
//! The client only ever sees a generic message for the failed operation; the
//! underlying cause is written to the log when the response is rendered.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::payments::errors::ProviderError;
use crate::storage::error::StorageError;
use crate::webhooks::WebhookError;

/// Result type for request handlers
pub type AppResult<T> = Result<T, AppError>;

/// Underlying cause of an [`AppError`]
#[derive(Debug, Error)]
pub enum AppErrorKind {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// A request body that claims to be JSON but does not parse
    #[error("malformed JSON body: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("{message}: {kind}")]
pub struct AppError {
    pub kind: AppErrorKind,
    message: &'static str,
}

impl AppError {
    /// Wrap a failure with the message shown to the client
    pub fn new(message: &'static str, kind: impl Into<AppErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            message,
        }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            AppErrorKind::Payload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self.kind, "{}", self.message());
        (self.status_code(), Json(json!({ "error": self.message() }))).into_response()
    }
}
