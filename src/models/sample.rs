//! Input record models

use serde::{Deserialize, Deserializer};

/// One observed price, keyed by block number and/or epoch timestamp
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceSample {
    #[serde(rename = "blockNumber", default)]
    pub block_number: Option<u64>,
    #[serde(rename = "timeStamp", default)]
    pub time_stamp: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<f64>,
}

/// Prices arrive either as JSON numbers or as decimal strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Option::<RawPrice>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawPrice::Number(price)) => price,
        Some(RawPrice::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid price string: '{}'", text)))?,
    };

    // "inf" and "NaN" parse as f64 but cannot be placed on an axis
    if !price.is_finite() {
        return Err(serde::de::Error::custom(format!("price must be finite, got {}", price)));
    }
    Ok(Some(price))
}
