use thiserror::Error;

use crate::traits::{FetchError, StoreError};

/// Errors that abort a receipt capture. Everything recoverable is reported through
/// [`crate::flow_objects::CaptureOutcome`] instead.
#[derive(Debug, Clone, Error)]
pub enum ReceiptFlowError {
    #[error("Authentication failed. {0}")]
    AuthError(FetchError),
    #[error("Receipt storage error. {0}")]
    StorageError(#[from] StoreError),
}
