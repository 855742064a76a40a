use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
    RequestBuilder,
    Url,
};
use serde::de::DeserializeOwned;

use crate::{
    config::VippsConfig,
    data_objects::{AccessTokenResponse, LoginTokens, UserInfo},
    AccessToken,
    OrderDetails,
    PaymentDetails,
    VippsApiError,
};

const LOGIN_SCOPES: &str = "openid email name phoneNumber";

/// How a request proves who is calling. The Vipps APIs disagree on this, so each endpoint picks one.
enum Credentials<'a> {
    /// Raw client credentials in headers. Only used to fetch an access token.
    ClientHeaders,
    /// A merchant access token plus the subscription key and merchant serial number.
    Merchant(&'a AccessToken),
    /// HTTP Basic auth with the client id and secret (Login API token endpoint).
    Basic,
    /// A bearer token issued to an end user by the Login API.
    User(&'a str),
}

#[derive(Clone)]
pub struct VippsApi {
    config: VippsConfig,
    client: Arc<Client>,
}

impl VippsApi {
    pub fn new(config: VippsConfig) -> Result<Self, VippsApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent("Vipps Receipt Storage Tool")
            .default_headers(headers)
            .build()
            .map_err(|e| VippsApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn request(&self, method: Method, path: &str, credentials: Credentials<'_>) -> RequestBuilder {
        let url = self.url(path);
        trace!("Preparing {method} request: {url}");
        let req = self.client.request(method, url);
        let subscription_key = self.config.subscription_key.reveal().as_str();
        let msn = self.config.merchant_serial_number.as_str();
        match credentials {
            Credentials::ClientHeaders => req
                .header("client_id", self.config.client_id.as_str())
                .header("client_secret", self.config.client_secret.reveal().as_str())
                .header("Ocp-Apim-Subscription-Key", subscription_key)
                .header("Merchant-Serial-Number", msn),
            Credentials::Merchant(token) => req
                .bearer_auth(token.reveal())
                .header("Ocp-Apim-Subscription-Key", subscription_key)
                .header("Merchant-Serial-Number", msn),
            Credentials::Basic => req.basic_auth(&self.config.client_id, Some(self.config.client_secret.reveal())),
            Credentials::User(token) => req.bearer_auth(token),
        }
    }

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, VippsApiError> {
        let response = req.send().await.map_err(|e| VippsApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| VippsApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| VippsApiError::RestResponseError(e.to_string()))?;
            Err(VippsApiError::QueryError { status, message })
        }
    }

    /// Obtains a merchant access token using client credentials. Any non-2xx response is an error.
    pub async fn access_token(&self) -> Result<AccessToken, VippsApiError> {
        debug!("Requesting access token for merchant {}", self.config.merchant_serial_number);
        let req = self.request(Method::POST, "/accesstoken/get", Credentials::ClientHeaders);
        let response = self.execute::<AccessTokenResponse>(req).await?;
        info!("Obtained access token");
        Ok(response.into())
    }

    /// Fetches payment details from the ePayment API. The response may include a `receiptUrl` and pre-built
    /// `receipt` data.
    pub async fn payment_details(
        &self,
        reference: &str,
        token: &AccessToken,
    ) -> Result<PaymentDetails, VippsApiError> {
        let path = format!("/epayment/v1/payments/{reference}");
        debug!("Fetching ePayment details for {reference}");
        let req = self.request(Method::GET, &path, Credentials::Merchant(token));
        let result = self.execute::<PaymentDetails>(req).await?;
        info!("Fetched ePayment details for {reference}");
        Ok(result)
    }

    /// Fetches the full order details from the Order Management API. Returns `None` when no order data has been
    /// registered for `order_id`.
    pub async fn order_details(
        &self,
        order_id: &str,
        token: &AccessToken,
    ) -> Result<Option<OrderDetails>, VippsApiError> {
        // paymentType is 'ecom' for both ePayment and eCom API payments
        let path = format!("/order-management/v2/ecom/{order_id}");
        debug!("Fetching Order Management details for {order_id}");
        let req = self.request(Method::GET, &path, Credentials::Merchant(token));
        match self.execute::<OrderDetails>(req).await {
            Ok(details) => {
                info!("Fetched Order Management details for {order_id}");
                Ok(Some(details))
            },
            Err(e) if e.is_not_found() => {
                debug!("No Order Management data registered for {order_id}");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    /// The URL a user must visit to log in with Vipps. The authorization code is delivered to the configured
    /// redirect URI.
    pub fn authorize_url(&self, state: &str) -> Result<Url, VippsApiError> {
        let url = self.url("/access-management-1.0/access/oauth2/auth");
        Url::parse_with_params(&url, &[
            ("client_id", self.config.client_id.as_str()),
            ("response_type", "code"),
            ("scope", LOGIN_SCOPES),
            ("state", state),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ])
        .map_err(|e| VippsApiError::InvalidUrl(format!("{url}. {e}")))
    }

    /// A random value for the `state` parameter of [`Self::authorize_url`].
    pub fn random_state() -> String {
        format!("{:016x}", rand::random::<u64>())
    }

    /// Exchanges an authorization code for ID and access tokens (Login API).
    pub async fn login(&self, auth_code: &str) -> Result<LoginTokens, VippsApiError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", auth_code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        debug!("Exchanging authorization code for tokens");
        let req =
            self.request(Method::POST, "/access-management-1.0/access/oauth2/token", Credentials::Basic).form(&form);
        let tokens = self.execute::<LoginTokens>(req).await?;
        info!("Received login tokens");
        Ok(tokens)
    }

    /// Fetches the profile of the user that `access_token` was issued to.
    pub async fn user_info(&self, access_token: &str) -> Result<UserInfo, VippsApiError> {
        let req = self.request(Method::GET, "/vipps-userinfo-api/userinfo", Credentials::User(access_token));
        let info = self.execute::<UserInfo>(req).await?;
        info!("Fetched user info for {}", info.sub);
        Ok(info)
    }
}

#[cfg(test)]
mod test {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };
    use vrs_common::Secret;

    use super::*;

    /// Serves canned JSON responses, chosen by path prefix, on a local port. Any other path gets a 404.
    async fn stub_server(routes: Vec<(&'static str, u16, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                loop {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    read += n;
                    if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]).to_string();
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) =
                    routes.iter().find(|(p, ..)| path.starts_with(p)).map(|(_, s, b)| (*s, *b)).unwrap_or((404, "{}"));
                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: \
                     close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    async fn stub_api(routes: Vec<(&'static str, u16, &'static str)>) -> VippsApi {
        let base_url = stub_server(routes).await;
        VippsApi::new(VippsConfig::default().with_base_url(&base_url)).unwrap()
    }

    fn api() -> VippsApi {
        let config = VippsConfig {
            client_id: "client-1".to_string(),
            client_secret: Secret::new("secret".to_string()),
            subscription_key: Secret::new("sub-key".to_string()),
            merchant_serial_number: "123456".to_string(),
            redirect_uri: "https://shop.example.com/callback".to_string(),
            base_url: "https://apitest.vipps.no/".to_string(),
        };
        VippsApi::new(config).unwrap()
    }

    #[test]
    fn urls() {
        let api = api();
        assert_eq!(api.url("/accesstoken/get"), "https://apitest.vipps.no/accesstoken/get");
    }

    #[test]
    fn authorize_url() {
        let url = api().authorize_url("abc").unwrap();
        assert_eq!(url.path(), "/access-management-1.0/access/oauth2/auth");
        let params = url.query_pairs().into_owned().collect::<Vec<(String, String)>>();
        assert!(params.contains(&("client_id".to_string(), "client-1".to_string())));
        assert!(params.contains(&("response_type".to_string(), "code".to_string())));
        assert!(params.contains(&("scope".to_string(), "openid email name phoneNumber".to_string())));
        assert!(params.contains(&("state".to_string(), "abc".to_string())));
        assert!(params.contains(&("redirect_uri".to_string(), "https://shop.example.com/callback".to_string())));
    }

    #[test]
    fn random_state_is_hex() {
        let state = VippsApi::random_state();
        assert_eq!(state.len(), 16);
        assert!(state.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_response_error() {
        let api = VippsApi::new(VippsConfig::default().with_base_url("http://127.0.0.1:9")).unwrap();
        let err = api.access_token().await.expect_err("Expected connection failure");
        assert!(matches!(err, VippsApiError::RestResponseError(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn access_token_from_server() {
        let api = stub_api(vec![(
            "/accesstoken/get",
            200,
            r#"{"token_type":"Bearer","expires_in":"3599","access_token":"tok-123"}"#,
        )])
        .await;
        let token = api.access_token().await.unwrap();
        assert_eq!(token.reveal(), "tok-123");
        assert_eq!(token.expires_in, Some(3599));
    }

    #[tokio::test]
    async fn rejected_credentials_are_a_query_error() {
        let api = stub_api(vec![("/accesstoken/get", 401, r#"{"error":"invalid_client"}"#)]).await;
        let err = api.access_token().await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn missing_order_management_data_is_none() {
        let api = stub_api(vec![]).await;
        let token = AccessToken::new("tok".to_string());
        let details = api.order_details("A1", &token).await.unwrap();
        assert!(details.is_none());
    }

    #[tokio::test]
    async fn order_management_server_error() {
        let api = stub_api(vec![("/order-management/v2/ecom/A1", 500, r#"{"title":"boom"}"#)]).await;
        let token = AccessToken::new("tok".to_string());
        let err = api.order_details("A1", &token).await.unwrap_err();
        assert!(matches!(&err, VippsApiError::QueryError { status: 500, message } if message.contains("boom")));
    }

    #[tokio::test]
    async fn order_management_receipt_with_odd_fields() {
        let body =
            r#"{"category":{"orderDetailsUrl":"http://x"},"receipt":{"orderLines":[{"name":null,"totalAmount":1.5}]}}"#;
        let api = stub_api(vec![("/order-management/v2/ecom/A1", 200, body)]).await;
        let token = AccessToken::new("tok".to_string());
        let details = api.order_details("A1", &token).await.unwrap().expect("Expected order details");
        assert_eq!(details.order_details_url(), Some("http://x"));
        assert_eq!(details.receipt.map(|r| r.order_lines().len()), Some(1));
    }

    #[tokio::test]
    async fn epayment_errors_are_query_errors() {
        let api = stub_api(vec![("/epayment/v1/payments/B2", 500, r#"{"title":"boom"}"#)]).await;
        let token = AccessToken::new("tok".to_string());
        let err = api.payment_details("B2", &token).await.unwrap_err();
        assert!(matches!(err, VippsApiError::QueryError { status: 500, .. }));
        // Unlike Order Management, an unknown payment reference is an error
        let err = api.payment_details("C3", &token).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
