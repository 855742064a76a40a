//! Vipps MobilePay API tools
//!
//! A thin, typed client over the handful of Vipps MobilePay endpoints needed to look up receipts for an order:
//! * the access token endpoint (client credentials),
//! * the ePayment API, which may carry a `receiptUrl` and pre-built `receipt` data,
//! * the Order Management API, which carries the enriched receipt and the order details URL,
//! * the Login API, used to identify the customer the receipts belong to.
mod api;
mod config;
mod error;
mod helpers;

pub mod data_objects;

pub use api::VippsApi;
pub use config::{VippsConfig, PRODUCTION_BASE_URL, TEST_BASE_URL};
pub use data_objects::{
    AccessToken,
    LoginTokens,
    OrderCategory,
    OrderDetails,
    OrderLine,
    PaymentAmount,
    PaymentDetails,
    Receipt,
    UserInfo,
};
pub use error::VippsApiError;
