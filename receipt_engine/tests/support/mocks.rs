use mockall::mock;
use receipt_engine::{
    storage::ReceiptStore,
    traits::{FetchError, LoadedStore, ReceiptFetcher, ReceiptStorage, StoreError},
    OrderId,
};
use vipps_tools::{AccessToken, OrderDetails, PaymentDetails};

mock! {
    pub Fetcher {}
    impl ReceiptFetcher for Fetcher {
        async fn access_token(&self) -> Result<AccessToken, FetchError>;
        async fn fetch_payment_details(&self, order_id: &OrderId, token: &AccessToken) -> Result<Option<PaymentDetails>, FetchError>;
        async fn fetch_order_details(&self, order_id: &OrderId, token: &AccessToken) -> Result<Option<OrderDetails>, FetchError>;
    }
}

mock! {
    pub Storage {}
    impl ReceiptStorage for Storage {
        fn load(&self) -> Result<LoadedStore, StoreError>;
        fn persist(&self, store: &ReceiptStore) -> Result<(), StoreError>;
    }
}
