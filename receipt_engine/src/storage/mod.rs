//! Receipt persistence. [`ReceiptStore`] is the in-memory view of the persisted document and [`JsonFileStorage`] is
//! the only backend: a single JSON file holding an array of receipt records.
mod json_file;
mod receipt_store;

pub use json_file::JsonFileStorage;
pub use receipt_store::{ReceiptStore, UpsertResult};
