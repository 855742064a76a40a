use chrono::{DateTime, Utc};
use log::*;
use thiserror::Error;
use vipps_tools::{OrderDetails, PaymentDetails, Receipt};

use crate::receipt_types::{DataSource, OrderId, ReceiptRecord};

/// Neither source had a receipt or a receipt URL for the order. Nothing should be stored.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("No receipt data or URL found for order {order_id}")]
pub struct NoReceiptData {
    pub order_id: OrderId,
    /// The sources that did answer, albeit without anything useful.
    pub sources: Vec<DataSource>,
}

/// Combines the ePayment and Order Management responses for `order_id` into a single receipt record.
///
/// Order Management is the more enriched source, so its `receipt` and `category.orderDetailsUrl` win over the
/// ePayment `receipt` and `receiptUrl` whenever both are present. Empty receipt objects and blank URLs count as
/// absent.
pub fn merge_receipt_data(
    order_id: &OrderId,
    payment: Option<&PaymentDetails>,
    order: Option<&OrderDetails>,
    fetched_at: DateTime<Utc>,
) -> Result<ReceiptRecord, NoReceiptData> {
    let mut source = Vec::with_capacity(2);
    if payment.is_some() {
        source.push(DataSource::EpaymentApi);
    }
    if order.is_some() {
        source.push(DataSource::OrderManagementApi);
    }
    let receipt = order
        .and_then(|o| usable_receipt(o.receipt.as_ref()))
        .or_else(|| payment.and_then(|p| usable_receipt(p.receipt.as_ref())))
        .cloned();
    let receipt_url = order
        .and_then(|o| usable_url(o.order_details_url()))
        .or_else(|| payment.and_then(|p| usable_url(p.receipt_url.as_deref())))
        .map(String::from);
    if receipt.is_none() && receipt_url.is_none() {
        debug!("Sources {source:?} had no receipt data for order {order_id}");
        return Err(NoReceiptData { order_id: order_id.clone(), sources: source });
    }
    Ok(ReceiptRecord { order_id: order_id.clone(), fetched_at, source, receipt, receipt_url })
}

fn usable_receipt(receipt: Option<&Receipt>) -> Option<&Receipt> {
    receipt.filter(|r| !r.is_empty())
}

fn usable_url(url: Option<&str>) -> Option<&str> {
    url.filter(|u| !u.trim().is_empty())
}
