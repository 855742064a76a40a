use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vipps_tools::Receipt;

use crate::helpers::timestamp;

//--------------------------------------        OrderId        --------------------------------------------------------
/// The merchant-assigned order identifier (the `reference` in ePayment terms). It is the join key across both Vipps
/// APIs and the primary key of the receipt store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

#[derive(Debug, Clone, Error)]
#[error("An order ID cannot be empty")]
pub struct EmptyOrderId;

impl FromStr for OrderId {
    type Err = EmptyOrderId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmptyOrderId);
        }
        Ok(Self(s.to_string()))
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------       DataSource      --------------------------------------------------------
/// The upstream APIs that can contribute to a receipt record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    EpaymentApi,
    OrderManagementApi,
}

impl Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EpaymentApi => f.write_str("ePayment"),
            Self::OrderManagementApi => f.write_str("Order Management"),
        }
    }
}

//--------------------------------------     ReceiptRecord     --------------------------------------------------------
/// The canonical, merged receipt for one order, exactly as it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    pub order_id: OrderId,
    #[serde(with = "timestamp")]
    pub fetched_at: DateTime<Utc>,
    /// Every source that returned data for the order, ePayment first.
    pub source: Vec<DataSource>,
    pub receipt: Option<Receipt>,
    pub receipt_url: Option<String>,
}

impl ReceiptRecord {
    pub fn has_receipt_data(&self) -> bool {
        self.receipt.is_some() || self.receipt_url.is_some()
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn order_ids_are_trimmed_and_non_empty() {
        let id = " A1 ".parse::<OrderId>().unwrap();
        assert_eq!(id.as_str(), "A1");
        assert_eq!(id.to_string(), "A1");
        assert!("".parse::<OrderId>().is_err());
        assert!("   ".parse::<OrderId>().is_err());
    }

    #[test]
    fn record_json_layout() {
        let record = ReceiptRecord {
            order_id: "A1".parse().unwrap(),
            fetched_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            source: vec![DataSource::EpaymentApi, DataSource::OrderManagementApi],
            receipt: None,
            receipt_url: Some("http://x".to_string()),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "orderId": "A1",
                "fetchedAt": "2024-05-01T12:00:00Z",
                "source": ["epayment_api", "order_management_api"],
                "receipt": null,
                "receiptUrl": "http://x"
            })
        );
        let back: ReceiptRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
