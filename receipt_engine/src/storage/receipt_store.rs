use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::receipt_types::{OrderId, ReceiptRecord};

/// An ordered collection of receipt records holding at most one record per order ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptStore {
    records: Vec<ReceiptRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertResult {
    Inserted,
    Updated,
}

impl Display for UpsertResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inserted => f.write_str("inserted"),
            Self::Updated => f.write_str("updated"),
        }
    }
}

impl ReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from raw records. Should the input contain the same order ID more than once, the last record
    /// wins and keeps the position of the first.
    pub fn from_records<I: IntoIterator<Item = ReceiptRecord>>(records: I) -> Self {
        let mut store = Self::new();
        records.into_iter().for_each(|r| {
            store.upsert(r);
        });
        store
    }

    /// Replaces the record with the same order ID in place, or appends `record` if there is none.
    pub fn upsert(&mut self, record: ReceiptRecord) -> UpsertResult {
        match self.records.iter_mut().find(|r| r.order_id == record.order_id) {
            Some(existing) => {
                *existing = record;
                UpsertResult::Updated
            },
            None => {
                self.records.push(record);
                UpsertResult::Inserted
            },
        }
    }

    pub fn find(&self, order_id: &OrderId) -> Option<&ReceiptRecord> {
        self.records.iter().find(|r| &r.order_id == order_id)
    }

    pub fn records(&self) -> &[ReceiptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
