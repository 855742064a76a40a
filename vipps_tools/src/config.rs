use log::*;
use vrs_common::{env_flag, Secret};

pub const TEST_BASE_URL: &str = "https://apitest.vipps.no";
pub const PRODUCTION_BASE_URL: &str = "https://api.vipps.no";

/// Credentials and endpoint parameters for the Vipps MobilePay APIs. Built once per run and handed to
/// [`crate::VippsApi::new`].
#[derive(Debug, Clone, Default)]
pub struct VippsConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub subscription_key: Secret<String>,
    pub merchant_serial_number: String,
    /// Only used by the Login API.
    pub redirect_uri: String,
    /// e.g. "https://apitest.vipps.no". No trailing slash is needed.
    pub base_url: String,
}

impl VippsConfig {
    pub fn new_from_env_or_default() -> Self {
        let client_id = std::env::var("VIPPS_CLIENT_ID").unwrap_or_else(|_| {
            warn!("VIPPS_CLIENT_ID not set, using (probably useless) default");
            "your_client_id".to_string()
        });
        let client_secret = Secret::new(std::env::var("VIPPS_CLIENT_SECRET").unwrap_or_else(|_| {
            warn!("VIPPS_CLIENT_SECRET not set, using (probably useless) default");
            "your_client_secret".to_string()
        }));
        let subscription_key = Secret::new(std::env::var("VIPPS_SUBSCRIPTION_KEY").unwrap_or_else(|_| {
            warn!("VIPPS_SUBSCRIPTION_KEY not set, using (probably useless) default");
            "your_subscription_key".to_string()
        }));
        let merchant_serial_number = std::env::var("VIPPS_MERCHANT_SERIAL_NUMBER").unwrap_or_else(|_| {
            warn!("VIPPS_MERCHANT_SERIAL_NUMBER not set, using (probably useless) default");
            "your_msn".to_string()
        });
        let redirect_uri = std::env::var("VIPPS_REDIRECT_URI").unwrap_or_else(|_| {
            debug!("VIPPS_REDIRECT_URI not set. The Login API will not be usable");
            "your_redirect_uri".to_string()
        });
        let base_url = std::env::var("VIPPS_BASE_URL").unwrap_or_else(|_| {
            if env_flag("VIPPS_PRODUCTION", false) {
                PRODUCTION_BASE_URL.to_string()
            } else {
                info!("VIPPS_BASE_URL not set, using the test environment at {TEST_BASE_URL}");
                TEST_BASE_URL.to_string()
            }
        });
        Self { client_id, client_secret, subscription_key, merchant_serial_number, redirect_uri, base_url }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}
