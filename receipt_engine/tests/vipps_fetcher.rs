use receipt_engine::{
    flow_objects::CaptureOutcome,
    DataSource,
    FetchError,
    JsonFileStorage,
    OrderId,
    ReceiptFlowApi,
    ReceiptFlowError,
};
use vipps_tools::{VippsApi, VippsConfig};

use crate::support::{
    prepare_env::{prepare_test_env, temp_store_path},
    stub_server::{start_stub_server, Route},
};

mod support;

const TOKEN: Route = Route {
    path: "/accesstoken/get",
    status: 200,
    body: r#"{"token_type":"Bearer","expires_in":"3599","access_token":"tok-123"}"#,
};

async fn vipps_api(routes: Vec<Route>) -> VippsApi {
    let base_url = start_stub_server(routes).await;
    VippsApi::new(VippsConfig::default().with_base_url(&base_url)).expect("Could not create client")
}

fn order_id(s: &str) -> OrderId {
    s.parse().expect("Invalid order id")
}

#[tokio::test]
async fn capture_from_vipps() {
    prepare_test_env();
    let (_dir, path) = temp_store_path();
    let api = vipps_api(vec![
        TOKEN,
        Route {
            path: "/epayment/v1/payments/A1",
            status: 200,
            body: r#"{"reference":"A1","receiptUrl":"http://pay"}"#,
        },
        Route {
            path: "/order-management/v2/ecom/A1",
            status: 200,
            body: r#"{"receipt":{"orderLines":[{"name":null,"totalAmount":10.5}],"bottomLine":{"currency":"NOK"}}}"#,
        },
    ])
    .await;
    let flow = ReceiptFlowApi::new(api, JsonFileStorage::new(&path));

    let outcome = flow.capture_receipt(&order_id("A1")).await.expect("Capture failed");
    assert!(outcome.fetch_warnings().is_empty());
    let record = outcome.record().expect("Expected a stored record");
    assert_eq!(record.source, vec![DataSource::EpaymentApi, DataSource::OrderManagementApi]);
    assert_eq!(record.receipt_url.as_deref(), Some("http://pay"));
    assert_eq!(record.receipt.as_ref().map(|r| r.order_lines().len()), Some(1));
    assert_eq!(flow.stored_receipts().unwrap().store.len(), 1);
}

#[tokio::test]
async fn missing_order_data_is_not_a_warning() {
    prepare_test_env();
    let (_dir, path) = temp_store_path();
    let api = vipps_api(vec![
        TOKEN,
        Route { path: "/epayment/v1/payments/A1", status: 500, body: r#"{"title":"Internal Server Error"}"# },
    ])
    .await;
    let flow = ReceiptFlowApi::new(api, JsonFileStorage::new(&path));

    let outcome = flow.capture_receipt(&order_id("A1")).await.expect("Capture failed");
    let warnings = outcome.fetch_warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].source, DataSource::EpaymentApi);
    assert!(matches!(warnings[0].error, FetchError::HttpError { status: 500, .. }));
    assert!(matches!(outcome, CaptureOutcome::NoReceiptData { .. }));
    assert!(!path.exists());
}

#[tokio::test]
async fn rejected_credentials_abort_the_capture() {
    prepare_test_env();
    let (_dir, path) = temp_store_path();
    let rejected = Route { path: "/accesstoken/get", status: 401, body: r#"{"error":"invalid_client"}"# };
    let api = vipps_api(vec![rejected]).await;
    let flow = ReceiptFlowApi::new(api, JsonFileStorage::new(&path));

    let err = flow.capture_receipt(&order_id("A1")).await.expect_err("Expected an auth error");
    assert!(matches!(err, ReceiptFlowError::AuthError(FetchError::HttpError { status: 401, .. })));
    assert!(!path.exists());
}
