//! Vipps Receipt Engine
//!
//! The receipt engine turns whatever Vipps knows about an order into a single receipt record and keeps those records
//! in a local JSON store.
//!
//! The library is divided into three parts:
//! 1. The data types ([`mod@receipt_types`]) and the merge rules that build a [`ReceiptRecord`] from the ePayment and
//!    Order Management responses. Order Management data wins whenever both sources provide a value.
//! 2. Storage ([`mod@storage`]). The store is an ordered list with at most one record per order ID, persisted as a
//!    whole by [`JsonFileStorage`].
//! 3. The flow API ([`ReceiptFlowApi`]), which authenticates, fetches both sources, merges and upserts. Data sources
//!    and storage backends plug in through the [`ReceiptFetcher`] and [`ReceiptStorage`] traits. `VippsApi`
//!    implements the former.
mod helpers;
mod rfe_api;

pub mod receipt_types;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_utils;

pub use helpers::{merge_receipt_data, timestamp, NoReceiptData};
pub use receipt_types::{DataSource, OrderId, ReceiptRecord};
pub use rfe_api::{errors::ReceiptFlowError, flow_objects, receipt_flow_api::ReceiptFlowApi};
pub use storage::{JsonFileStorage, ReceiptStore, UpsertResult};
pub use traits::{FetchError, LoadedStore, ReceiptFetcher, ReceiptStorage, StorageCorruption, StoreError};
