use thiserror::Error;
use vipps_tools::{AccessToken, OrderDetails, PaymentDetails};

use crate::receipt_types::OrderId;

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Query failed with HTTP status {status}. {message}")]
    HttpError { status: u16, message: String },
    #[error("Could not complete the request. {0}")]
    RequestError(String),
}

/// A source of receipt data for an order. The Vipps implementation lives on [`vipps_tools::VippsApi`].
#[allow(async_fn_in_trait)]
pub trait ReceiptFetcher {
    /// Obtain a token for the subsequent fetches. Failure here is fatal for a capture.
    async fn access_token(&self) -> Result<AccessToken, FetchError>;
    /// Payment status from the ePayment API. `Ok(None)` means the source has nothing for this order.
    async fn fetch_payment_details(
        &self,
        order_id: &OrderId,
        token: &AccessToken,
    ) -> Result<Option<PaymentDetails>, FetchError>;
    /// Order details from the Order Management API. `Ok(None)` means the source has nothing for this order.
    async fn fetch_order_details(
        &self,
        order_id: &OrderId,
        token: &AccessToken,
    ) -> Result<Option<OrderDetails>, FetchError>;
}
