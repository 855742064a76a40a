use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use vrs_common::MinorUnits;

/// Deserializes an optional field, treating a value of the wrong shape as missing instead of rejecting the whole
/// response. Vipps does not promise a schema for most of what it returns.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], for amounts given in minor units. See [`minor_units`].
pub fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<MinorUnits>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(minor_units(&value))
}

/// Reads an amount in minor units. Integers are taken as they are, other finite numbers are rounded.
pub fn minor_units(value: &Value) -> Option<MinorUnits> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
        .map(MinorUnits::from)
}
