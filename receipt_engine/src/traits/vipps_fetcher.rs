use vipps_tools::{AccessToken, OrderDetails, PaymentDetails, VippsApi, VippsApiError};

use crate::{
    receipt_types::OrderId,
    traits::{FetchError, ReceiptFetcher},
};

impl From<VippsApiError> for FetchError {
    fn from(e: VippsApiError) -> Self {
        match e {
            VippsApiError::QueryError { status, message } => Self::HttpError { status, message },
            e => Self::RequestError(e.to_string()),
        }
    }
}

impl ReceiptFetcher for VippsApi {
    async fn access_token(&self) -> Result<AccessToken, FetchError> {
        Ok(VippsApi::access_token(self).await?)
    }

    async fn fetch_payment_details(
        &self,
        order_id: &OrderId,
        token: &AccessToken,
    ) -> Result<Option<PaymentDetails>, FetchError> {
        let details = self.payment_details(order_id.as_str(), token).await?;
        Ok(Some(details))
    }

    async fn fetch_order_details(
        &self,
        order_id: &OrderId,
        token: &AccessToken,
    ) -> Result<Option<OrderDetails>, FetchError> {
        Ok(self.order_details(order_id.as_str(), token).await?)
    }
}
