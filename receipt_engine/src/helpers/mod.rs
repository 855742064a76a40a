mod receipt_merge;
pub mod timestamp;

pub use receipt_merge::{merge_receipt_data, NoReceiptData};
