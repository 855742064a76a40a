use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use vipps_tools::Receipt;

use crate::receipt_types::{DataSource, ReceiptRecord};

pub fn receipt_with_lines(lines: &[(&str, i64)]) -> Receipt {
    let order_lines =
        lines.iter().map(|(name, amount)| json!({ "name": name, "totalAmount": amount })).collect::<Vec<Value>>();
    Receipt::from(json!({ "orderLines": order_lines, "bottomLine": { "currency": "NOK" } }))
}

pub fn record(order_id: &str, receipt: Option<Receipt>, receipt_url: Option<&str>) -> ReceiptRecord {
    ReceiptRecord {
        order_id: order_id.parse().expect("Invalid order id in test"),
        fetched_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        source: vec![DataSource::OrderManagementApi],
        receipt,
        receipt_url: receipt_url.map(String::from),
    }
}
