//! The seams between the engine and the outside world: where receipt data comes from and where it is kept.
mod receipt_fetcher;
mod receipt_storage;
mod vipps_fetcher;

pub use receipt_fetcher::{FetchError, ReceiptFetcher};
pub use receipt_storage::{LoadedStore, ReceiptStorage, StorageCorruption, StoreError};
