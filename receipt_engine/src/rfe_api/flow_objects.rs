use std::fmt::Display;

use crate::{
    receipt_types::{DataSource, OrderId, ReceiptRecord},
    storage::UpsertResult,
    traits::{FetchError, StorageCorruption},
};

/// One source failed to answer. The capture carries on with whatever the other source provided.
#[derive(Debug, Clone)]
pub struct FetchWarning {
    pub source: DataSource,
    pub error: FetchError,
}

impl Display for FetchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not fetch {} details: {}", self.source, self.error)
    }
}

#[derive(Debug, Clone)]
pub struct StoredReceipt {
    pub record: ReceiptRecord,
    pub upsert: UpsertResult,
    pub fetch_warnings: Vec<FetchWarning>,
    /// Set when the existing store was unreadable and has now been overwritten.
    pub storage_warning: Option<StorageCorruption>,
}

#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    Stored(StoredReceipt),
    /// Neither source had a receipt or receipt URL. The store was left untouched.
    NoReceiptData { order_id: OrderId, sources: Vec<DataSource>, fetch_warnings: Vec<FetchWarning> },
}

impl CaptureOutcome {
    pub fn fetch_warnings(&self) -> &[FetchWarning] {
        match self {
            Self::Stored(stored) => &stored.fetch_warnings,
            Self::NoReceiptData { fetch_warnings, .. } => fetch_warnings,
        }
    }

    pub fn record(&self) -> Option<&ReceiptRecord> {
        match self {
            Self::Stored(stored) => Some(&stored.record),
            Self::NoReceiptData { .. } => None,
        }
    }
}
