//! `ReceiptFlowApi` runs the full fetch, merge and store cycle for a single order.

use std::fmt::Debug;

use log::*;

use crate::{
    helpers::{merge_receipt_data, timestamp, NoReceiptData},
    receipt_types::{DataSource, OrderId, ReceiptRecord},
    rfe_api::{
        errors::ReceiptFlowError,
        flow_objects::{CaptureOutcome, FetchWarning, StoredReceipt},
    },
    traits::{FetchError, LoadedStore, ReceiptFetcher, ReceiptStorage, StorageCorruption},
};

pub struct ReceiptFlowApi<F, S> {
    fetcher: F,
    storage: S,
}

impl<F, S> Debug for ReceiptFlowApi<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReceiptFlowApi")
    }
}

impl<F, S> ReceiptFlowApi<F, S> {
    pub fn new(fetcher: F, storage: S) -> Self {
        Self { fetcher, storage }
    }
}

impl<F, S> ReceiptFlowApi<F, S>
where S: ReceiptStorage
{
    /// Loads every stored receipt, in storage order.
    pub fn stored_receipts(&self) -> Result<LoadedStore, ReceiptFlowError> {
        Ok(self.storage.load()?)
    }

    /// The stored receipt for `order_id`, along with any warning raised while loading the store.
    pub fn stored_receipt(
        &self,
        order_id: &OrderId,
    ) -> Result<(Option<ReceiptRecord>, Option<StorageCorruption>), ReceiptFlowError> {
        let LoadedStore { store, warning } = self.storage.load()?;
        Ok((store.find(order_id).cloned(), warning))
    }
}

impl<F, S> ReceiptFlowApi<F, S>
where
    F: ReceiptFetcher,
    S: ReceiptStorage,
{
    /// Fetch everything Vipps knows about the receipt for `order_id`, merge it and save the result.
    ///
    /// Only an authentication failure or a storage error aborts the capture. A source that fails is reported as a
    /// [`FetchWarning`] and treated as absent. If neither source yields a receipt or receipt URL, the store is not
    /// touched and [`CaptureOutcome::NoReceiptData`] is returned.
    pub async fn capture_receipt(&self, order_id: &OrderId) -> Result<CaptureOutcome, ReceiptFlowError> {
        let token = self.fetcher.access_token().await.map_err(ReceiptFlowError::AuthError)?;
        debug!("🧾️ Authenticated. Fetching receipt data for order {order_id}");
        let mut fetch_warnings = Vec::new();
        let payment = self.fetcher.fetch_payment_details(order_id, &token).await;
        let payment = degrade(payment, DataSource::EpaymentApi, &mut fetch_warnings);
        let order = self.fetcher.fetch_order_details(order_id, &token).await;
        let order = degrade(order, DataSource::OrderManagementApi, &mut fetch_warnings);

        let record = match merge_receipt_data(order_id, payment.as_ref(), order.as_ref(), timestamp::now()) {
            Ok(record) => record,
            Err(NoReceiptData { order_id, sources }) => {
                info!("🧾️ No receipt data or URL found for order {order_id}. Nothing was stored");
                return Ok(CaptureOutcome::NoReceiptData { order_id, sources, fetch_warnings });
            },
        };

        let LoadedStore { mut store, warning } = self.storage.load()?;
        let upsert = store.upsert(record.clone());
        self.storage.persist(&store)?;
        debug!("🧾️ Receipt for order {order_id} {upsert}. The store now holds {} receipts", store.len());
        Ok(CaptureOutcome::Stored(StoredReceipt { record, upsert, fetch_warnings, storage_warning: warning }))
    }
}

fn degrade<T>(result: Result<Option<T>, FetchError>, source: DataSource, warnings: &mut Vec<FetchWarning>) -> Option<T> {
    match result {
        Ok(data) => data,
        Err(error) => {
            let warning = FetchWarning { source, error };
            warn!("🧾️ {warning}");
            warnings.push(warning);
            None
        },
    }
}
