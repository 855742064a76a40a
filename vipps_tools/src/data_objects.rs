use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vrs_common::{MinorUnits, Secret, DEFAULT_CURRENCY_CODE};

use crate::helpers::{lenient, lenient_amount, minor_units};

//--------------------------------------     AccessToken      --------------------------------------------------------
/// A merchant access token obtained via client credentials.
#[derive(Clone)]
pub struct AccessToken {
    token: Secret<String>,
    pub expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self { token: Secret::new(token), expires_in: None }
    }

    pub fn reveal(&self) -> &str {
        self.token.reveal().as_str()
    }

    /// The first few characters of the token, which is enough to tell tokens apart in terminal output.
    pub fn preview(&self) -> String {
        let preview = self.reveal().chars().take(10).collect::<String>();
        format!("{preview}...")
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({}, expires_in: {:?})", self.token, self.expires_in)
    }
}

/// The raw response from `/accesstoken/get`. Vipps encodes the expiry values as strings.
#[derive(Deserialize)]
pub(crate) struct AccessTokenResponse {
    pub access_token: String,
    pub expires_in: Option<String>,
}

impl From<AccessTokenResponse> for AccessToken {
    fn from(response: AccessTokenResponse) -> Self {
        let expires_in = response.expires_in.and_then(|s| s.parse::<u64>().ok());
        Self { token: Secret::new(response.access_token), expires_in }
    }
}

//--------------------------------------       Receipt        --------------------------------------------------------
/// Receipt data, as attached to an order by the merchant. Vipps does not guarantee its shape, so the receipt is kept
/// exactly as received and is only read, leniently, when it needs to be summarised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Receipt(Value);

/// A line item read from a receipt. Missing or malformed values are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub name: Option<String>,
    pub total_amount: Option<MinorUnits>,
}

impl Default for Receipt {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl From<Value> for Receipt {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Receipt {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn order_lines(&self) -> Vec<OrderLine> {
        let Some(lines) = self.0.get("orderLines").and_then(Value::as_array) else {
            return Vec::new();
        };
        lines
            .iter()
            .map(|line| OrderLine {
                name: line.get("name").and_then(Value::as_str).map(String::from),
                total_amount: line.get("totalAmount").and_then(minor_units),
            })
            .collect()
    }

    /// The total from the bottom line when given, otherwise the sum of the order lines.
    pub fn total_amount(&self) -> MinorUnits {
        self.bottom_line("totalAmount")
            .and_then(minor_units)
            .unwrap_or_else(|| self.order_lines().iter().filter_map(|l| l.total_amount).sum())
    }

    pub fn currency(&self) -> &str {
        self.bottom_line("currency").and_then(Value::as_str).unwrap_or(DEFAULT_CURRENCY_CODE)
    }

    /// True for a receipt that carries no data at all: `{}`, `[]`, `""`, `0`, `false` or `null`.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
        }
    }

    fn bottom_line(&self, field: &str) -> Option<&Value> {
        self.0.get("bottomLine").and_then(|b| b.get(field))
    }
}

//--------------------------------------    PaymentDetails    --------------------------------------------------------
/// Response from the ePayment API `GET /epayment/v1/payments/{reference}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub amount: Option<PaymentAmount>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentAmount {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount", skip_serializing_if = "Option::is_none")]
    pub value: Option<MinorUnits>,
}

//--------------------------------------     OrderDetails     --------------------------------------------------------
/// Response from the Order Management API `GET /order-management/v2/ecom/{orderId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub category: Option<OrderCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCategory {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub order_details_url: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl OrderDetails {
    pub fn order_details_url(&self) -> Option<&str> {
        self.category.as_ref().and_then(|c| c.order_details_url.as_deref())
    }
}

//--------------------------------------        Login         --------------------------------------------------------
/// Tokens returned by the Login API after exchanging an authorization code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginTokens {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}
